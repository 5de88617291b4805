//! Option kinds and the metadata sets built from tags.
//!
//! ## Menu
//!
//! - [`OptionKind`]: the closed set of configurable options.
//! - [`AccessorKind`]: the operations an accessor call can request.
//! - [`MetadataSet`]: per-kind settings with an explicit flag, supporting overlay.
//! - [`MutatorRef`]: an unresolved reference to a mutator callback.

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod metadata_set;
mod mutator;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{AccessorKind, OptionKind};
pub use metadata_set::{MetadataSet, OptionValue, Setting};
pub use mutator::MutatorRef;
