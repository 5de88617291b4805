use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{OnceLock, PoisonError, RwLock};

use acc_host::hash::{HashMap, HashSet};
use acc_host::{Instance, Introspect, Value};

use crate::class::{ClassConfig, native_methods};
use crate::dispatch::{self, Outcome};
use crate::format::{FormatTable, NamingFormat, Standard};
use crate::meta::{MetadataSet, OptionKind};
use crate::property::PropertySet;
use crate::{AccessError, ConfigError};

type Slot = Arc<OnceLock<Result<Arc<ClassConfig>, ConfigError>>>;

// -----------------------------------------------------------------------------
// Registry

/// Builds, caches and serves the accessor configuration of classes.
///
/// Configurations are built lazily on first access, parents before
/// children, and kept for the lifetime of the registry. A class that fails
/// to build keeps failing with the same [`ConfigError`].
///
/// The registry is `Send + Sync`. Concurrent first accesses to a class
/// build it once: other callers wait until the configuration is complete.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use acc_engine::Registry;
/// use acc_host::{ClassDef, ClassTable, PropertyDef, Tag};
///
/// let mut table = ClassTable::new();
/// table.insert(
///     ClassDef::new("User")
///         .accessible()
///         .tag(Tag::get(true))
///         .tag(Tag::set(true))
///         .property(PropertyDef::protected("name")),
/// ).unwrap();
/// let table = Arc::new(table);
///
/// let registry = Registry::new(table.clone());
/// let mut user = table.instantiate("User").unwrap();
///
/// registry.set(&mut user, "name", "ada").unwrap();
/// assert_eq!(registry.get(&mut user, "name").unwrap().as_str(), Some("ada"));
/// assert!(registry.get(&mut user, "NAME").is_err());
/// ```
pub struct Registry {
    introspect: Arc<dyn Introspect>,
    formats: FormatTable,
    configs: RwLock<HashMap<Arc<str>, Slot>>,
}

impl Registry {
    /// Creates a registry with the built-in naming formats.
    #[inline]
    pub fn new(introspect: Arc<dyn Introspect>) -> Self {
        Self::with_formats(introspect, FormatTable::new())
    }

    /// Creates a registry resolving `Format` tags against `formats`.
    pub fn with_formats(introspect: Arc<dyn Introspect>, formats: FormatTable) -> Self {
        Self {
            introspect,
            formats,
            configs: RwLock::new(HashMap::default()),
        }
    }

    #[inline]
    pub fn introspect(&self) -> &dyn Introspect {
        &*self.introspect
    }

    #[inline]
    pub fn formats(&self) -> &FormatTable {
        &self.formats
    }

    /// Returns `true` if the configuration of `class` was built already.
    pub fn is_built(&self, class: &str) -> bool {
        self.configs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Returns the configuration of a class, building it on first use.
    ///
    /// # Errors
    ///
    /// - [`AccessError::UnknownClass`] if the class is not declared.
    /// - [`AccessError::Config`] if the class or an ancestor is misconfigured.
    pub fn config(&self, class: &str) -> Result<Arc<ClassConfig>, AccessError> {
        if !self.introspect.contains(class) {
            return Err(AccessError::UnknownClass(Arc::from(class)));
        }
        Ok(self.resolve(class)?)
    }

    fn resolve(&self, class: &str) -> Result<Arc<ClassConfig>, ConfigError> {
        self.slot(class).get_or_init(|| self.build(class)).clone()
    }

    fn slot(&self, class: &str) -> Slot {
        {
            let configs = self.configs.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = configs.get(class) {
                return slot.clone();
            }
        }

        let mut configs = self.configs.write().unwrap_or_else(PoisonError::into_inner);
        configs.entry(Arc::from(class)).or_default().clone()
    }

    fn build(&self, class: &str) -> Result<Arc<ClassConfig>, ConfigError> {
        let introspect = &*self.introspect;
        let name: Arc<str> = Arc::from(class);

        self.check_acyclic(&name)?;

        let parent = match introspect.parent(class) {
            None => None,
            Some(parent) if !introspect.contains(parent) => {
                return Err(ConfigError::UnknownParent {
                    class: name,
                    parent: Arc::from(parent),
                });
            }
            Some(parent) => Some(self.resolve(parent)?),
        };

        let native = native_methods(introspect, class);
        let accessible_parent = parent.filter(|p| p.is_enabled());

        let with_docs = match &accessible_parent {
            Some(parent) => parent.with_docs(),
            None => {
                let capability = introspect.capability(class);
                if !capability.is_enabled() {
                    log::debug!("class `{class}` does not use accessors");
                    return Ok(Arc::new(ClassConfig::disabled(name, native)));
                }
                capability.with_docs()
            }
        };

        let own = MetadataSet::from_tags(
            introspect.class_tags(class),
            &format!("class `{class}`"),
            &self.formats,
        )?;

        let (metadata, root, parent_properties): (_, _, Option<Arc<PropertySet>>) =
            match &accessible_parent {
                Some(parent) => {
                    let root = parent.root().cloned().unwrap_or_else(|| name.clone());
                    for option in [OptionKind::Immutable, OptionKind::NamingFormat] {
                        if own.is_explicit(option) {
                            return Err(ConfigError::OptionRedeclared {
                                root,
                                class: name,
                                option,
                            });
                        }
                    }
                    (
                        own.overlay_onto(parent.metadata()),
                        root,
                        Some(parent.shared_properties().clone()),
                    )
                }
                None => (own.with_default_format(Arc::new(Standard)), name.clone(), None),
            };

        let format = metadata
            .format()
            .cloned()
            .unwrap_or_else(|| Arc::new(Standard) as Arc<dyn NamingFormat>);

        let properties = PropertySet::build(
            introspect,
            &self.formats,
            &name,
            &metadata,
            &*format,
            parent_properties.as_deref(),
            with_docs,
        )?;

        log::debug!(
            "built accessors of `{class}`: {} properties, format `{}`, root `{root}`",
            properties.len(),
            format.name(),
        );

        Ok(Arc::new(ClassConfig::enabled(
            &self.introspect,
            name,
            root,
            with_docs,
            metadata,
            format,
            Arc::new(properties),
            native,
        )))
    }

    fn check_acyclic(&self, class: &Arc<str>) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = HashSet::default();
        let mut current = Some(&**class);

        while let Some(name) = current {
            if !seen.insert(name) {
                return Err(ConfigError::InheritanceCycle(class.clone()));
            }
            current = self.introspect.parent(name);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Access surface

    /// Reads a property, like `obj.name`.
    ///
    /// The name is matched per the class's case policy.
    pub fn get(&self, receiver: &mut Instance, name: &str) -> Result<Value, AccessError> {
        let config = self.config(receiver.class())?;
        dispatch::get(&config, receiver, name)
    }

    /// Assigns a property, like `obj.name = value`.
    ///
    /// Immutable properties can't be assigned.
    pub fn set(
        &self,
        receiver: &mut Instance,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), AccessError> {
        let config = self.config(receiver.class())?;
        dispatch::set(&config, receiver, name, value.into())
    }

    /// Checks whether a property holds a value, like `isset(obj.name)`.
    pub fn isset(&self, receiver: &mut Instance, name: &str) -> Result<bool, AccessError> {
        let config = self.config(receiver.class())?;
        dispatch::isset(&config, receiver, name)
    }

    /// Deletes a property, like `unset(obj.name)`.
    pub fn unset(&self, receiver: &mut Instance, name: &str) -> Result<(), AccessError> {
        let config = self.config(receiver.class())?;
        dispatch::unset(&config, receiver, name)
    }

    /// Calls a method on the receiver.
    ///
    /// Public methods of the class are invoked directly. Any other name is
    /// parsed as an accessor call by the class's naming format, see
    /// [`Outcome`] for the results.
    pub fn call(
        &self,
        receiver: &mut Instance,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Outcome, AccessError> {
        let config = self.config(receiver.class())?;
        dispatch::call(&config, receiver, method, args)
    }
}
