#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod class;
mod dispatch;
mod error;
mod registry;

pub mod format;
pub mod meta;
pub mod property;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use class::{ClassConfig, DeleteFn, ExistsFn, ReadFn, WriteFn};
pub use dispatch::Outcome;
pub use error::{AccessError, ArityError, ConfigError, Operation};
pub use registry::Registry;
