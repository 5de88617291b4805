//! Class declarations: the shape of the host's classes.
//!
//! ## Menu
//!
//! - [`Modifiers`]: visibility and `static` flags of a member.
//! - [`PropertyDef`]: a declared property with its tags and default value.
//! - [`MethodDef`]: a declared method and its body.
//! - [`ClassDef`]: a class declaration built with a fluent API.
//! - [`Capability`]: whether a class opts into the accessor capability.

// -----------------------------------------------------------------------------
// Modules

mod class_def;
mod method_def;
mod modifiers;
mod property_def;

// -----------------------------------------------------------------------------
// Exports

pub use class_def::{Capability, ClassDef};
pub use method_def::{InstanceMethod, MethodBody, MethodDef, StaticMethod};
pub use modifiers::Modifiers;
pub use property_def::PropertyDef;
