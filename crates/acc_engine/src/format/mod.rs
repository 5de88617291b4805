//! Naming formats: how method names map to accessor kinds and properties.
//!
//! A [`NamingFormat`] is selected per class hierarchy with the `Format` tag
//! on its topmost accessible class, by the name it is registered under in a
//! [`FormatTable`]. Hierarchies without a `Format` tag use [`Standard`].
//!
//! ## Menu
//!
//! - [`NamingFormat`]: the strategy trait.
//! - [`MatchedMethod`]: a method name split into accessor kind and suffix.
//! - [`Standard`]: `getFoo`, `setFoo`, `withFoo`, `issetFoo`, `unsetFoo` and bare `foo()`.
//! - [`SnakeCase`]: `get_foo`, `set_foo`, `with_foo`, `isset_foo`, `unset_foo`.
//! - [`FormatTable`]: named format factories.

// -----------------------------------------------------------------------------
// Modules

mod snake_case;
mod standard;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use snake_case::SnakeCase;
pub use standard::Standard;
pub use table::{FormatFactory, FormatTable};

use alloc::string::String;
use core::fmt::Debug;

use crate::meta::AccessorKind;

// -----------------------------------------------------------------------------
// MatchedMethod

/// A method name recognized by a [`NamingFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedMethod {
    pub kind: AccessorKind,
    /// The property part of the name, possibly empty. Looked up ignoring case.
    pub suffix: String,
}

impl MatchedMethod {
    #[inline]
    pub fn new(kind: AccessorKind, suffix: impl Into<String>) -> Self {
        Self {
            kind,
            suffix: suffix.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// NamingFormat

/// A method naming strategy.
///
/// # Examples
///
/// ```
/// use acc_engine::format::{MatchedMethod, NamingFormat, Standard};
/// use acc_engine::meta::AccessorKind;
///
/// let format = Standard;
/// assert_eq!(format.match_called("issetFoo"), Some(MatchedMethod::new(AccessorKind::Isset, "Foo")));
/// assert_eq!(format.match_called("set"), Some(MatchedMethod::new(AccessorKind::Set, "")));
/// assert_eq!(format.match_called("foo"), None);
/// ```
pub trait NamingFormat: Debug + Send + Sync {
    /// The name the format is registered under.
    fn name(&self) -> &str;

    /// Parses the name of a called method.
    fn match_called(&self, method: &str) -> Option<MatchedMethod>;

    /// Parses the name of a declared method when discovering endpoints.
    ///
    /// Matches with an empty suffix never become endpoints.
    fn match_endpoint_candidate(&self, method: &str) -> Option<MatchedMethod> {
        self.match_called(method)
    }

    /// Whether `foo()` reads and `foo(value)` writes property `foo`.
    fn allow_bare_property_call(&self) -> bool;
}

/// Strips the first matching `(prefix, kind)` pair, ignoring ASCII case.
fn strip_prefix<'a>(
    method: &'a str,
    prefixes: &[(&str, AccessorKind)],
) -> Option<(AccessorKind, &'a str)> {
    prefixes.iter().find_map(|(prefix, kind)| {
        let head = method.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| (*kind, &method[prefix.len()..]))
    })
}
