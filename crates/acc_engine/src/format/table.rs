use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use acc_host::Value;
use acc_host::hash::HashMap;

use crate::format::{NamingFormat, SnakeCase, Standard};

/// Builds a format from the arguments following its name in a `Format` tag.
///
/// Returns `None` when the arguments are not acceptable.
pub type FormatFactory = Arc<dyn Fn(&[Value]) -> Option<Arc<dyn NamingFormat>> + Send + Sync>;

// -----------------------------------------------------------------------------
// FormatTable

/// Naming formats by name. Names are matched ignoring ASCII case.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use acc_engine::format::{FormatTable, NamingFormat, Standard};
///
/// let mut formats = FormatTable::new();
/// formats.register("camel", |args| {
///     args.is_empty().then(|| Arc::new(Standard) as Arc<dyn NamingFormat>)
/// });
///
/// assert!(formats.create("Camel", &[]).is_some());
/// assert!(formats.create("camel", &["x".into()]).is_none());
/// assert!(formats.create("kebab", &[]).is_none());
/// ```
#[derive(Clone)]
pub struct FormatTable {
    factories: HashMap<String, FormatFactory>,
}

impl Default for FormatTable {
    /// See [`FormatTable::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FormatTable {
    /// Creates a table without any format.
    #[inline]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::default(),
        }
    }

    /// Creates a table with the built-in formats, [`Standard`] and
    /// [`SnakeCase`], which take no arguments.
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.register(Standard::NAME, |args| {
            args.is_empty().then(|| Arc::new(Standard) as Arc<dyn NamingFormat>)
        });
        table.register(SnakeCase::NAME, |args| {
            args.is_empty().then(|| Arc::new(SnakeCase) as Arc<dyn NamingFormat>)
        });
        table
    }

    /// Registers a factory, replacing any factory with the same name.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&[Value]) -> Option<Arc<dyn NamingFormat>> + Send + Sync + 'static,
    {
        self.factories
            .insert(name.to_ascii_lowercase(), Arc::new(factory));
    }

    /// Returns `true` if a format is registered under `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_ascii_lowercase())
    }

    /// Instantiates a format.
    pub fn create(&self, name: &str, args: &[Value]) -> Option<Arc<dyn NamingFormat>> {
        let factory = self.factories.get(&name.to_ascii_lowercase())?;
        factory(args)
    }
}

impl fmt::Debug for FormatTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FormatTable").field("formats", &names).finish()
    }
}
