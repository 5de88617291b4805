use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::class::{Capability, MethodDef, Modifiers, PropertyDef};
use crate::{Tag, Value};

// -----------------------------------------------------------------------------
// Free functions

/// A free function of the host, callable by name.
pub type FunctionFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

// -----------------------------------------------------------------------------
// PropertyInfo

/// A property visible on a class, along with the class declaring it.
#[derive(Debug, Clone, Copy)]
pub struct PropertyInfo<'a> {
    pub def: &'a PropertyDef,
    pub declaring_class: &'a str,
}

// -----------------------------------------------------------------------------
// Introspect

/// Read-only view of the host's classes.
///
/// Every query about an undeclared class returns an empty answer
/// (`None`, `false`, an empty list); callers check [`contains`] first when
/// the difference matters.
///
/// [`contains`]: Introspect::contains
pub trait Introspect: Send + Sync {
    /// Returns `true` if the class is declared.
    fn contains(&self, class: &str) -> bool;

    /// Returns the immediate parent class.
    fn parent(&self, class: &str) -> Option<&str>;

    /// Returns the capability declared by the class itself.
    fn capability(&self, class: &str) -> Capability;

    /// Returns the metadata tags attached to the class.
    fn class_tags(&self, class: &str) -> &[Tag];

    /// Returns the raw documentation comment of the class.
    fn class_docs(&self, class: &str) -> Option<&str>;

    /// Returns the properties visible on the class.
    ///
    /// Those are the class's own properties, whatever their visibility, and
    /// the non-private properties of its ancestors that the class does not
    /// redeclare.
    fn properties(&self, class: &str) -> Vec<PropertyInfo<'_>>;

    /// Returns the methods visible on the class whose visibility is
    /// selected by `filter`.
    ///
    /// Inherited methods are included unless private; an override in a
    /// descendant hides the ancestor's method.
    fn methods(&self, class: &str, filter: Modifiers) -> Vec<&MethodDef>;

    /// Finds a method of any visibility declared by the class or one of its
    /// ancestors, ignoring case. The most derived declaration wins.
    fn find_method(&self, class: &str, name: &str) -> Option<&MethodDef>;

    /// Returns the free function registered under `name`.
    fn function(&self, name: &str) -> Option<FunctionFn>;
}
