#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod instance;
mod introspect;
mod table;
mod tag;
mod value;

pub mod class;
pub mod docs;
pub mod hash;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use class::{
    Capability, ClassDef, InstanceMethod, MethodBody, MethodDef, Modifiers, PropertyDef,
    StaticMethod,
};
pub use error::TableError;
pub use instance::Instance;
pub use introspect::{FunctionFn, Introspect, PropertyInfo};
pub use table::ClassTable;
pub use tag::Tag;
pub use value::Value;
