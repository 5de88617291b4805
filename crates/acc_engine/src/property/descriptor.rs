use alloc::format;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec;
use core::fmt;

use acc_host::{FunctionFn, Instance, Introspect, MethodDef, PropertyDef, Value};

use crate::{AccessError, ConfigError};
use crate::format::FormatTable;
use crate::meta::{AccessorKind, MetadataSet, MutatorRef};
use crate::property::Endpoints;

// -----------------------------------------------------------------------------
// Mutator

#[derive(Clone)]
enum Handle {
    Function(FunctionFn),
    Static(MethodDef),
    /// Looked up on the receiver's class at each call.
    Bound(Arc<str>),
}

/// A mutator callback validated against the declared classes.
///
/// Free functions and static methods are resolved once. Bound methods are
/// checked against the property's declaring class, then called on the
/// receiver's class so that overrides apply; an instance method receives
/// the receiver, a static one only the value.
#[derive(Clone)]
pub struct Mutator {
    reference: MutatorRef,
    handle: Handle,
}

impl Mutator {
    fn resolve(
        introspect: &dyn Introspect,
        reference: &MutatorRef,
        class: &str,
        property: &str,
    ) -> Option<Self> {
        let reference = reference.expand(property);

        let handle = match &reference {
            MutatorRef::Function(name) => Handle::Function(introspect.function(name)?),
            MutatorRef::Static { class, method } => introspect
                .find_method(class, method)
                .filter(|m| m.modifiers().is_static())
                .cloned()
                .map(Handle::Static)?,
            MutatorRef::Bound(method) => introspect
                .find_method(class, method)
                .map(|m| Handle::Bound(m.shared_name().clone()))?,
        };

        Some(Self { reference, handle })
    }

    /// The reference, with `%property%` already replaced.
    #[inline]
    pub fn reference(&self) -> &MutatorRef {
        &self.reference
    }

    /// Transforms a value about to be stored in `receiver`.
    ///
    /// # Errors
    ///
    /// Fails with [`AccessError::UnknownMethod`] if a bound method can't be
    /// found on the receiver's class.
    pub fn apply(
        &self,
        introspect: &dyn Introspect,
        receiver: &mut Instance,
        value: Value,
    ) -> Result<Value, AccessError> {
        match &self.handle {
            Handle::Function(function) => Ok(function(value)),
            Handle::Static(method) => Ok(method.invoke(receiver, vec![value])),
            Handle::Bound(name) => {
                let Some(method) = introspect.find_method(receiver.class(), name) else {
                    return Err(AccessError::UnknownMethod {
                        class: receiver.class_name().clone(),
                        method: name.to_string(),
                    });
                };
                Ok(method.invoke(receiver, vec![value]))
            }
        }
    }
}

impl fmt::Debug for Mutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mutator")
            .field(&format_args!("{}", self.reference))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// The resolved accessor rules of one property.
///
/// Built once, from the class declaring the property, and shared by every
/// descendant that inherits the property without redeclaring it.
#[derive(Debug)]
pub struct PropertyDescriptor {
    name: Arc<str>,
    declaring_class: Arc<str>,
    public: bool,
    metadata: MetadataSet,
    readable: bool,
    writable: bool,
    deletable: bool,
    immutable: bool,
    mutator: Option<Mutator>,
    endpoints: Endpoints,
}

impl PropertyDescriptor {
    /// Resolves a property declared by `class`.
    ///
    /// The effective metadata is the property's own tags overlaid onto the
    /// documentation tags (if any), overlaid onto `class_meta`. Public
    /// properties ignore all metadata and endpoints.
    ///
    /// # Errors
    ///
    /// Fails on malformed property tags and on a mutator that does not name
    /// an existing function or method.
    pub(crate) fn build(
        introspect: &dyn Introspect,
        formats: &FormatTable,
        class: &Arc<str>,
        def: &PropertyDef,
        doc_meta: Option<&MetadataSet>,
        class_meta: &MetadataSet,
        endpoints: Endpoints,
    ) -> Result<Self, ConfigError> {
        if def.modifiers().is_public() {
            if !def.tags().is_empty() || doc_meta.is_some() {
                log::debug!("metadata of public property `{class}::{}` is ignored", def.name());
            }
            return Ok(Self {
                name: def.shared_name().clone(),
                declaring_class: class.clone(),
                public: true,
                metadata: MetadataSet::new(),
                readable: false,
                writable: false,
                deletable: false,
                immutable: false,
                mutator: None,
                endpoints: Endpoints::default(),
            });
        }

        let target = format!("property `{class}::{}`", def.name());
        let own = MetadataSet::from_tags(def.tags(), &target, formats)?;
        let metadata = match doc_meta {
            Some(docs) => own.overlay_onto(&docs.overlay_onto(class_meta)),
            None => own.overlay_onto(class_meta),
        };

        let mutator = match metadata.mutator() {
            None => None,
            Some(reference) => Some(
                Mutator::resolve(introspect, reference, class, def.name()).ok_or_else(|| {
                    ConfigError::InvalidMutator {
                        class: class.clone(),
                        property: def.shared_name().clone(),
                        mutator: reference.expand(def.name()).to_string(),
                    }
                })?,
            ),
        };

        Ok(Self {
            name: def.shared_name().clone(),
            declaring_class: class.clone(),
            public: false,
            readable: metadata.readable(),
            writable: metadata.writable(),
            deletable: metadata.deletable(),
            immutable: metadata.immutable(),
            metadata,
            mutator,
            endpoints,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class whose rules apply to this property.
    #[inline]
    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// The effective metadata; empty for public properties.
    #[inline]
    pub fn metadata(&self) -> &MetadataSet {
        &self.metadata
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.readable
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    #[inline]
    pub fn is_deletable(&self) -> bool {
        self.deletable
    }

    #[inline]
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    #[inline]
    pub fn mutator(&self) -> Option<&Mutator> {
        self.mutator.as_ref()
    }

    #[inline]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The name of the method handling `kind`, if any.
    #[inline]
    pub fn endpoint(&self, kind: AccessorKind) -> Option<&str> {
        self.endpoints.get(kind)
    }
}
