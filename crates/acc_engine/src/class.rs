use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use acc_host::hash::{HashMap, HashSet};
use acc_host::{Instance, Introspect, MethodDef, Modifiers, Value};

use crate::format::{NamingFormat, Standard};
use crate::meta::{AccessorKind, MetadataSet};
use crate::property::{PropertyDescriptor, PropertySet};
use crate::{AccessError, Operation};

// -----------------------------------------------------------------------------
// Dispatch closures

/// Reads a property.
pub type ReadFn =
    Box<dyn Fn(&mut Instance, &str, Option<&PropertyDescriptor>) -> Result<Value, AccessError> + Send + Sync>;

/// Writes a property with `set` or `with`; may return a replacement receiver.
pub type WriteFn = Box<
    dyn Fn(&mut Instance, AccessorKind, &str, Value, Option<&PropertyDescriptor>) -> Result<Option<Instance>, AccessError>
        + Send
        + Sync,
>;

/// Checks whether a property holds a value.
pub type ExistsFn =
    Box<dyn Fn(&mut Instance, &str, Option<&PropertyDescriptor>) -> Result<bool, AccessError> + Send + Sync>;

/// Deletes a property.
pub type DeleteFn =
    Box<dyn Fn(&mut Instance, &str, Option<&PropertyDescriptor>) -> Result<(), AccessError> + Send + Sync>;

// -----------------------------------------------------------------------------
// ClassConfig

/// The resolved accessor configuration of one class.
///
/// Obtained from [`Registry::config`](crate::Registry::config). A class
/// outside any accessible hierarchy gets a disabled configuration whose
/// operations fail with [`AccessError::NotAccessible`].
///
/// The four operations take the property name as it was requested and the
/// descriptor found for it (if any); they check that the operation is
/// enabled, then call the property's endpoint or touch the field.
pub struct ClassConfig {
    name: Arc<str>,
    root: Option<Arc<str>>,
    with_docs: bool,
    metadata: MetadataSet,
    format: Arc<dyn NamingFormat>,
    properties: Arc<PropertySet>,
    native: HashMap<String, MethodDef>,
    read: ReadFn,
    write: WriteFn,
    exists: ExistsFn,
    delete: DeleteFn,
}

impl ClassConfig {
    pub(crate) fn disabled(name: Arc<str>, native: HashMap<String, MethodDef>) -> Self {
        let refuse = |name: &Arc<str>| {
            let name = name.clone();
            move || AccessError::NotAccessible(name.clone())
        };

        let (r, w, e, d) = (refuse(&name), refuse(&name), refuse(&name), refuse(&name));

        Self {
            root: None,
            with_docs: false,
            metadata: MetadataSet::new(),
            format: Arc::new(Standard),
            properties: Arc::new(PropertySet::new()),
            native,
            read: Box::new(move |_: &mut Instance, _: &str, _: Option<&PropertyDescriptor>| Err::<Value, _>(r())),
            write: Box::new(
                move |_: &mut Instance, _: AccessorKind, _: &str, _: Value, _: Option<&PropertyDescriptor>| {
                    Err::<Option<Instance>, _>(w())
                },
            ),
            exists: Box::new(move |_: &mut Instance, _: &str, _: Option<&PropertyDescriptor>| Err::<bool, _>(e())),
            delete: Box::new(move |_: &mut Instance, _: &str, _: Option<&PropertyDescriptor>| Err::<(), _>(d())),
            name,
        }
    }

    pub(crate) fn enabled(
        introspect: &Arc<dyn Introspect>,
        name: Arc<str>,
        root: Arc<str>,
        with_docs: bool,
        metadata: MetadataSet,
        format: Arc<dyn NamingFormat>,
        properties: Arc<PropertySet>,
        native: HashMap<String, MethodDef>,
    ) -> Self {
        Self {
            read: reader(introspect.clone(), name.clone()),
            write: writer(introspect.clone(), name.clone()),
            exists: existence(introspect.clone(), name.clone()),
            delete: deleter(introspect.clone(), name.clone()),
            name,
            root: Some(root),
            with_docs,
            metadata,
            format,
            properties,
            native,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    /// The topmost class of the hierarchy using accessors; `None` if disabled.
    #[inline]
    pub fn root(&self) -> Option<&Arc<str>> {
        self.root.as_ref()
    }

    /// Returns `true` if the class uses accessors.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    /// Returns `true` if `@property` documentation tags are read.
    #[inline]
    pub fn with_docs(&self) -> bool {
        self.with_docs
    }

    /// The class-wide metadata, inherited options included.
    #[inline]
    pub fn metadata(&self) -> &MetadataSet {
        &self.metadata
    }

    /// Returns `true` if property names are matched ignoring case.
    #[inline]
    pub fn is_case_insensitive(&self) -> bool {
        self.metadata.case_insensitive()
    }

    #[inline]
    pub fn format(&self) -> &dyn NamingFormat {
        &*self.format
    }

    #[inline]
    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    #[inline]
    pub(crate) fn shared_properties(&self) -> &Arc<PropertySet> {
        &self.properties
    }

    /// Finds a property descriptor.
    #[inline]
    pub fn find(&self, name: &str, case_insensitive: bool) -> Option<&Arc<PropertyDescriptor>> {
        self.properties.find(name, case_insensitive)
    }

    /// Returns the public method callable as `name`, ignoring case.
    #[inline]
    pub fn native_method(&self, name: &str) -> Option<&MethodDef> {
        self.native.get(&name.to_ascii_lowercase())
    }

    pub fn read(
        &self,
        receiver: &mut Instance,
        name: &str,
        property: Option<&PropertyDescriptor>,
    ) -> Result<Value, AccessError> {
        (self.read)(receiver, name, property)
    }

    pub fn write(
        &self,
        receiver: &mut Instance,
        kind: AccessorKind,
        name: &str,
        value: Value,
        property: Option<&PropertyDescriptor>,
    ) -> Result<Option<Instance>, AccessError> {
        (self.write)(receiver, kind, name, value, property)
    }

    pub fn exists(
        &self,
        receiver: &mut Instance,
        name: &str,
        property: Option<&PropertyDescriptor>,
    ) -> Result<bool, AccessError> {
        (self.exists)(receiver, name, property)
    }

    pub fn delete(
        &self,
        receiver: &mut Instance,
        name: &str,
        property: Option<&PropertyDescriptor>,
    ) -> Result<(), AccessError> {
        (self.delete)(receiver, name, property)
    }
}

impl fmt::Debug for ClassConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassConfig")
            .field("name", &self.name)
            .field("root", &self.root)
            .field("with_docs", &self.with_docs)
            .field("format", &self.format.name())
            .field("properties", &self.properties.len())
            .finish_non_exhaustive()
    }
}

/// Public methods of a class by lowercase name.
pub(crate) fn native_methods(introspect: &dyn Introspect, class: &str) -> HashMap<String, MethodDef> {
    introspect
        .methods(class, Modifiers::PUBLIC)
        .into_iter()
        .map(|m| (m.name().to_ascii_lowercase(), m.clone()))
        .collect()
}

// -----------------------------------------------------------------------------
// Gating

/// Checks that `op` is enabled on the property.
pub(crate) fn gate<'p>(
    class: &Arc<str>,
    name: &str,
    property: Option<&'p PropertyDescriptor>,
    op: Operation,
) -> Result<&'p PropertyDescriptor, AccessError> {
    let Some(property) = property else {
        return Err(AccessError::UnknownProperty {
            class: class.clone(),
            property: name.to_string(),
            op,
        });
    };

    let enabled = match op {
        Operation::Read => property.is_readable(),
        Operation::Write => property.is_writable(),
        Operation::Delete => property.is_deletable(),
    };

    if enabled {
        Ok(property)
    } else if property.is_public() {
        Err(AccessError::PublicProperty {
            class: class.clone(),
            property: name.to_string(),
            op,
        })
    } else {
        Err(AccessError::MisconfiguredProperty {
            class: class.clone(),
            property: name.to_string(),
            op,
        })
    }
}

/// Fails if an immutable property is about to be deleted.
pub(crate) fn check_deletion(
    class: &Arc<str>,
    name: &str,
    property: &PropertyDescriptor,
) -> Result<(), AccessError> {
    if property.is_immutable() {
        return Err(AccessError::ImmutableUnset {
            class: class.clone(),
            property: name.to_string(),
        });
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Closures

/// Calls an endpoint by name on the receiver's class.
fn call_endpoint(
    introspect: &dyn Introspect,
    receiver: &mut Instance,
    method: &str,
    args: Vec<Value>,
) -> Result<Value, AccessError> {
    let Some(def) = introspect.find_method(receiver.class(), method) else {
        return Err(AccessError::UnknownMethod {
            class: receiver.class_name().clone(),
            method: method.to_string(),
        });
    };
    Ok(def.invoke(receiver, args))
}

/// Returns `true` if `class` is `ancestor` or one of its descendants.
fn is_instance_of<'a>(introspect: &'a dyn Introspect, class: &'a str, ancestor: &str) -> bool {
    let mut seen: HashSet<&str> = HashSet::default();
    let mut current = Some(class);

    while let Some(name) = current {
        if name == ancestor {
            return true;
        }
        if !seen.insert(name) {
            return false;
        }
        current = introspect.parent(name);
    }
    false
}

fn reader(introspect: Arc<dyn Introspect>, class: Arc<str>) -> ReadFn {
    Box::new(
        move |receiver: &mut Instance,
              name: &str,
              property: Option<&PropertyDescriptor>|
              -> Result<Value, AccessError> {
            let property = gate(&class, name, property, Operation::Read)?;

            match property.endpoint(AccessorKind::Get) {
                Some(endpoint) => call_endpoint(&*introspect, receiver, endpoint, Vec::new()),
                None => Ok(receiver.field_or_null(property.name())),
            }
        },
    )
}

fn writer(introspect: Arc<dyn Introspect>, class: Arc<str>) -> WriteFn {
    Box::new(
        move |receiver: &mut Instance,
              kind: AccessorKind,
              name: &str,
              value: Value,
              property: Option<&PropertyDescriptor>|
              -> Result<Option<Instance>, AccessError> {
            let property = gate(&class, name, property, Operation::Write)?;

            if let Some(endpoint) = property.endpoint(kind) {
                let result = call_endpoint(&*introspect, receiver, endpoint, vec![value])?;

                if kind == AccessorKind::With
                    && let Value::Object(replacement) = result
                    && is_instance_of(&*introspect, replacement.class(), receiver.class())
                {
                    return Ok(Some(*replacement));
                }
                return Ok(None);
            }

            let value = match property.mutator() {
                Some(mutator) => mutator.apply(&*introspect, receiver, value)?,
                None => value,
            };

            receiver
                .set_field(property.name(), value)
                .map_err(|_| AccessError::UnknownProperty {
                    class: class.clone(),
                    property: name.to_string(),
                    op: Operation::Write,
                })?;

            Ok(None)
        },
    )
}

fn existence(introspect: Arc<dyn Introspect>, class: Arc<str>) -> ExistsFn {
    Box::new(
        move |receiver: &mut Instance,
              name: &str,
              property: Option<&PropertyDescriptor>|
              -> Result<bool, AccessError> {
            let property = gate(&class, name, property, Operation::Read)?;

            Ok(match property.endpoint(AccessorKind::Isset) {
                Some(endpoint) => call_endpoint(&*introspect, receiver, endpoint, Vec::new())?.is_truthy(),
                None => receiver.field(property.name()).is_some_and(|v| !v.is_null()),
            })
        },
    )
}

fn deleter(introspect: Arc<dyn Introspect>, class: Arc<str>) -> DeleteFn {
    Box::new(
        move |receiver: &mut Instance,
              name: &str,
              property: Option<&PropertyDescriptor>|
              -> Result<(), AccessError> {
            let property = gate(&class, name, property, Operation::Delete)?;
            check_deletion(&class, name, property)?;

            match property.endpoint(AccessorKind::Unset) {
                Some(endpoint) => {
                    call_endpoint(&*introspect, receiver, endpoint, Vec::new())?;
                }
                None => {
                    receiver.clear_field(property.name());
                }
            }
            Ok(())
        },
    )
}
