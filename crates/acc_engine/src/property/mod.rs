//! Per-property resolved state.
//!
//! ## Menu
//!
//! - [`Endpoints`]: the names of the user methods handling each accessor kind of a property.
//! - [`Mutator`]: a validated mutator callback.
//! - [`PropertyDescriptor`]: everything an access to one property needs.
//! - [`PropertySet`]: the descriptors visible on a class, by exact and lowercase name.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod endpoint;
mod property_set;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{Mutator, PropertyDescriptor};
pub use endpoint::Endpoints;
pub use property_set::PropertySet;

pub(crate) use endpoint::discover_endpoints;
