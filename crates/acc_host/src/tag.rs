use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use crate::Value;

// -----------------------------------------------------------------------------
// Tag

/// A metadata tag attached to a class or a property.
///
/// A tag is an `(identifier, arguments)` pair. The host keeps tags opaque;
/// interpreting the identifiers is up to the consumer, so unknown tags may
/// coexist with the ones an engine understands.
///
/// The associated constructors build the tags recognized by the accessor
/// engine.
///
/// # Examples
///
/// ```
/// use acc_host::{Tag, Value};
///
/// let tag = Tag::set(false);
/// assert_eq!(tag.name(), "Set");
/// assert_eq!(tag.args(), &[Value::Bool(false)]);
///
/// let tag = Tag::new("Mutator").with_arg("$this->trim");
/// assert_eq!(tag.args()[0].as_str(), Some("$this->trim"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    name: Cow<'static, str>,
    args: Vec<Value>,
}

impl Tag {
    /// Identifier of the readable switch.
    pub const GET: &'static str = "Get";
    /// Identifier of the writable switch.
    pub const SET: &'static str = "Set";
    /// Identifier of the deletable switch.
    pub const DELETE: &'static str = "Delete";
    /// Identifier of the immutable switch.
    pub const IMMUTABLE: &'static str = "Immutable";
    /// Identifier of the case-insensitive switch.
    pub const ICASE: &'static str = "ICase";
    /// Identifier of the mutator option.
    pub const MUTATOR: &'static str = "Mutator";
    /// Identifier of the naming format option.
    pub const FORMAT: &'static str = "Format";

    /// Creates a tag without arguments.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    #[inline]
    pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Returns the identifier.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the arguments.
    #[inline]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// `Get(enabled)`
    #[inline]
    pub fn get(enabled: bool) -> Self {
        Self::new(Self::GET).with_arg(enabled)
    }

    /// `Set(enabled)`
    #[inline]
    pub fn set(enabled: bool) -> Self {
        Self::new(Self::SET).with_arg(enabled)
    }

    /// `Delete(enabled)`
    #[inline]
    pub fn delete(enabled: bool) -> Self {
        Self::new(Self::DELETE).with_arg(enabled)
    }

    /// `Immutable`
    #[inline]
    pub fn immutable() -> Self {
        Self::new(Self::IMMUTABLE)
    }

    /// `ICase`
    #[inline]
    pub fn icase() -> Self {
        Self::new(Self::ICASE)
    }

    /// `Mutator(callback)`, see the engine docs for the accepted forms.
    #[inline]
    pub fn mutator(callback: impl Into<Value>) -> Self {
        Self::new(Self::MUTATOR).with_arg(callback)
    }

    /// `Format(name)`
    #[inline]
    pub fn format(name: &'static str) -> Self {
        Self::new(Self::FORMAT).with_arg(name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
