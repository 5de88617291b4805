use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::class::Modifiers;
use crate::{Tag, Value};

// -----------------------------------------------------------------------------
// PropertyDef

/// A property declared in a class body.
///
/// # Examples
///
/// ```
/// use acc_host::{PropertyDef, Tag};
///
/// let prop = PropertyDef::protected("foo")
///     .tag(Tag::get(true))
///     .default_value("initial");
///
/// assert_eq!(prop.name(), "foo");
/// assert!(!prop.modifiers().is_public());
/// assert_eq!(prop.default().unwrap().as_str(), Some("initial"));
/// ```
#[derive(Debug, Clone)]
pub struct PropertyDef {
    name: Arc<str>,
    modifiers: Modifiers,
    default: Option<Value>,
    tags: Vec<Tag>,
}

impl PropertyDef {
    /// Creates a property with the given modifiers, no default and no tags.
    #[inline]
    pub fn new(name: &str, modifiers: Modifiers) -> Self {
        Self {
            name: Arc::from(name),
            modifiers,
            default: None,
            tags: Vec::new(),
        }
    }

    #[inline]
    pub fn public(name: &str) -> Self {
        Self::new(name, Modifiers::PUBLIC)
    }

    #[inline]
    pub fn protected(name: &str) -> Self {
        Self::new(name, Modifiers::PROTECTED)
    }

    #[inline]
    pub fn private(name: &str) -> Self {
        Self::new(name, Modifiers::PRIVATE)
    }

    /// Attaches a metadata tag.
    #[inline]
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Sets the initial value; without one the field starts uninitialized.
    #[inline]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[inline]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}
