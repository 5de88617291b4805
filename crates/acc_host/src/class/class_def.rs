use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::Tag;
use crate::class::{MethodDef, PropertyDef};

// -----------------------------------------------------------------------------
// Capability

/// Whether a class itself opts into the accessor capability.
///
/// Descendants of an opted-in class are covered implicitly; this only
/// records what the class declares on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Capability {
    #[default]
    None,
    /// Accessors configured by tags only.
    Accessible,
    /// Accessors configured by tags and by `@property` tags of the class
    /// documentation comment.
    AccessibleWithDocs,
}

impl Capability {
    #[inline]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }

    #[inline]
    pub const fn with_docs(self) -> bool {
        matches!(self, Self::AccessibleWithDocs)
    }
}

// -----------------------------------------------------------------------------
// ClassDef

/// A class declaration.
///
/// # Examples
///
/// ```
/// use acc_host::{ClassDef, MethodDef, PropertyDef, Tag};
///
/// let class = ClassDef::new("Point")
///     .accessible()
///     .tag(Tag::get(true))
///     .property(PropertyDef::protected("x").default_value(0))
///     .property(PropertyDef::protected("y").default_value(0))
///     .method(MethodDef::public("norm1", |this, _| {
///         let x = this.field("x").and_then(|v| v.as_int()).unwrap_or(0);
///         let y = this.field("y").and_then(|v| v.as_int()).unwrap_or(0);
///         (x.abs() + y.abs()).into()
///     }));
///
/// assert_eq!(class.name(), "Point");
/// assert_eq!(class.properties().len(), 2);
/// assert!(class.property_def("x").is_some());
/// assert!(class.method_def("NORM1").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ClassDef {
    name: Arc<str>,
    parent: Option<Arc<str>>,
    capability: Capability,
    tags: Vec<Tag>,
    docs: Option<String>,
    properties: Vec<PropertyDef>,
    methods: Vec<MethodDef>,
}

impl ClassDef {
    /// Creates an empty class without parent.
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            parent: None,
            capability: Capability::None,
            tags: Vec::new(),
            docs: None,
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Sets the parent class.
    #[inline]
    pub fn extends(mut self, parent: &str) -> Self {
        self.parent = Some(Arc::from(parent));
        self
    }

    /// Opts into the accessor capability.
    #[inline]
    pub fn accessible(mut self) -> Self {
        self.capability = Capability::Accessible;
        self
    }

    /// Opts into the accessor capability, reading `@property` doc tags too.
    #[inline]
    pub fn accessible_with_docs(mut self) -> Self {
        self.capability = Capability::AccessibleWithDocs;
        self
    }

    /// Attaches a class-level metadata tag.
    #[inline]
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Sets the documentation comment.
    #[inline]
    pub fn doc(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Declares a property.
    ///
    /// Redeclaring a name replaces the earlier declaration.
    pub fn property(mut self, property: PropertyDef) -> Self {
        match self
            .properties
            .iter_mut()
            .find(|p| p.name() == property.name())
        {
            Some(slot) => *slot = property,
            None => self.properties.push(property),
        }
        self
    }

    /// Declares a method.
    ///
    /// Method names are case-insensitive; redeclaring a name replaces the
    /// earlier declaration.
    pub fn method(mut self, method: MethodDef) -> Self {
        match self
            .methods
            .iter_mut()
            .find(|m| m.name().eq_ignore_ascii_case(method.name()))
        {
            Some(slot) => *slot = method,
            None => self.methods.push(method),
        }
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
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[inline]
    pub const fn capability(&self) -> Capability {
        self.capability
    }

    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[inline]
    pub fn docs(&self) -> Option<&str> {
        self.docs.as_deref()
    }

    /// Properties declared in this class body, in declaration order.
    #[inline]
    pub fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    /// Methods declared in this class body, in declaration order.
    #[inline]
    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }

    /// Returns the property declared in this class body with the exact name.
    pub fn property_def(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Returns the method declared in this class body, ignoring case.
    pub fn method_def(&self, name: &str) -> Option<&MethodDef> {
        self.methods
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }
}
