use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

use acc_host::docs::parse_property_tags;
use acc_host::hash::HashMap;
use acc_host::Introspect;

use crate::ConfigError;
use crate::format::{FormatTable, NamingFormat};
use crate::meta::MetadataSet;
use crate::property::{PropertyDescriptor, discover_endpoints};

// -----------------------------------------------------------------------------
// PropertySet

/// The property descriptors visible on a class.
///
/// Properties inherited without redeclaration share the ancestor's
/// descriptor, so a descendant never changes how they behave.
#[derive(Debug, Default)]
pub struct PropertySet {
    exact: HashMap<Arc<str>, Arc<PropertyDescriptor>>,
    lowercase: HashMap<String, Arc<PropertyDescriptor>>,
}

impl PropertySet {
    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the properties of `class`.
    ///
    /// `parent` is the set of the closest ancestor using the accessor
    /// capability, if any. Properties declared by ancestors without the
    /// capability are left out.
    pub(crate) fn build(
        introspect: &dyn Introspect,
        formats: &FormatTable,
        class: &Arc<str>,
        class_meta: &MetadataSet,
        format: &dyn NamingFormat,
        parent: Option<&PropertySet>,
        with_docs: bool,
    ) -> Result<Self, ConfigError> {
        let endpoints = discover_endpoints(introspect, class, format);

        let mut doc_meta: HashMap<String, MetadataSet> = HashMap::default();
        if with_docs && let Some(docs) = introspect.class_docs(class) {
            for prop in parse_property_tags(docs) {
                let target = format!("documentation of `{class}::{}`", prop.name);
                let meta = MetadataSet::from_tags(&prop.access.tags(), &target, formats)?;
                doc_meta.insert(prop.name, meta);
            }
        }

        let mut set = Self::new();

        for info in introspect.properties(class) {
            let name = info.def.name();

            let descriptor = if info.declaring_class == &**class {
                let own = endpoints.get(&name.to_lowercase()).cloned().unwrap_or_default();
                let descriptor = PropertyDescriptor::build(
                    introspect,
                    formats,
                    class,
                    info.def,
                    doc_meta.get(name),
                    class_meta,
                    own,
                )?;
                Arc::new(descriptor)
            } else if let Some(inherited) = parent.and_then(|p| p.find(name, false)) {
                inherited.clone()
            } else {
                log::trace!(
                    "`{class}::{name}` is declared by `{}`, which does not use accessors",
                    info.declaring_class
                );
                continue;
            };

            set.insert(descriptor);
        }

        Ok(set)
    }

    fn insert(&mut self, descriptor: Arc<PropertyDescriptor>) {
        self.lowercase
            .insert(descriptor.name().to_lowercase(), descriptor.clone());
        self.exact.insert(Arc::from(descriptor.name()), descriptor);
    }

    /// Finds a descriptor by name, optionally ignoring case.
    pub fn find(&self, name: &str, case_insensitive: bool) -> Option<&Arc<PropertyDescriptor>> {
        if case_insensitive {
            self.lowercase.get(&name.to_lowercase())
        } else {
            self.exact.get(name)
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Iterates over the descriptors, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PropertyDescriptor>> {
        self.exact.values()
    }
}
