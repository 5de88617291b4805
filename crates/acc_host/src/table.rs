use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::class::{Capability, ClassDef, MethodDef, Modifiers};
use crate::hash::{HashMap, HashSet};
use crate::introspect::{FunctionFn, Introspect, PropertyInfo};
use crate::{Instance, Tag, TableError, Value};

// -----------------------------------------------------------------------------
// ClassTable

/// The declared classes and free functions of the host.
///
/// Classes are inserted base-first: a class can only extend a class that is
/// already present, so the hierarchy is always acyclic.
///
/// # Examples
///
/// ```
/// use acc_host::{ClassDef, ClassTable, PropertyDef};
///
/// let mut table = ClassTable::new();
/// table.insert(ClassDef::new("Base").property(PropertyDef::protected("id").default_value(7))).unwrap();
/// table.insert(ClassDef::new("Child").extends("Base").property(PropertyDef::private("tag"))).unwrap();
///
/// let obj = table.instantiate("Child").unwrap();
/// assert_eq!(obj.field("id").and_then(|v| v.as_int()), Some(7));
/// assert!(obj.has_field("tag"));
/// assert!(!obj.is_initialized("tag"));
///
/// assert!(table.insert(ClassDef::new("Orphan").extends("Nope")).is_err());
/// ```
#[derive(Default)]
pub struct ClassTable {
    classes: HashMap<Arc<str>, ClassDef>,
    functions: HashMap<Arc<str>, FunctionFn>,
}

impl ClassTable {
    /// Creates an empty table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a class declaration.
    ///
    /// Fails if a class with the same name exists or if the parent is not
    /// declared yet.
    pub fn insert(&mut self, class: ClassDef) -> Result<(), TableError> {
        if self.classes.contains_key(class.name()) {
            return Err(TableError::DuplicateClass(class.shared_name().clone()));
        }

        if let Some(parent) = class.parent()
            && !self.classes.contains_key(parent)
        {
            return Err(TableError::UnknownParent {
                class: class.shared_name().clone(),
                parent: Arc::from(parent),
            });
        }

        log::trace!("declared class `{}`", class.name());
        self.classes.insert(class.shared_name().clone(), class);
        Ok(())
    }

    /// Registers a free function, replacing any function with the same name.
    pub fn register_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.functions.insert(Arc::from(name), Arc::new(function));
    }

    /// Returns the declaration of a class.
    #[inline]
    pub fn get(&self, class: &str) -> Option<&ClassDef> {
        self.classes.get(class)
    }

    /// Returns the number of declared classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Creates an instance of a class.
    ///
    /// Every property declared along the hierarchy gets a slot, filled with
    /// its default value when it has one. A redeclared property takes the
    /// default of the most derived declaration.
    pub fn instantiate(&self, class: &str) -> Result<Instance, TableError> {
        let Some(def) = self.classes.get(class) else {
            return Err(TableError::UnknownClass(Arc::from(class)));
        };

        let chain: Vec<&ClassDef> = self.ancestry(class).collect();
        let mut fields = HashMap::default();

        for ancestor in chain.iter().rev() {
            for property in ancestor.properties() {
                fields.insert(property.shared_name().clone(), property.default().cloned());
            }
        }

        Ok(Instance::new(def.shared_name().clone(), fields))
    }

    /// Iterates over the class and its ancestors, most derived first.
    pub fn ancestry<'a>(&'a self, class: &str) -> impl Iterator<Item = &'a ClassDef> + use<'a> {
        let first = self.classes.get(class);
        core::iter::successors(first, |def| {
            def.parent().and_then(|parent| self.classes.get(parent))
        })
    }

    /// Inserts every class submitted with [`register_class!`](crate::register_class).
    ///
    /// Classes already present are skipped, so repeated calls are cheap.
    /// Submitted classes are inserted parent-first whatever their submission
    /// order.
    ///
    /// ## Return Value
    ///
    /// Returns `Ok(true)` if automatic registration is supported, `Ok(false)`
    /// when the `auto_register` feature is disabled.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::UnknownParent`] if a submitted class extends
    /// a class that is neither present nor submitted.
    pub fn auto_register(&mut self) -> Result<bool, TableError> {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;

            let pending = auto_register::__registered()
                .filter(|def| !self.classes.contains_key(def.name()))
                .collect();

            self.insert_parent_first(pending)?;
            Ok(true)
        }

        #[cfg(not(feature = "auto_register"))]
        {
            Ok(false)
        }
    }

    #[cfg(feature = "auto_register")]
    fn insert_parent_first(&mut self, mut pending: Vec<ClassDef>) -> Result<(), TableError> {
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();

            for def in pending {
                let ready = def.parent().is_none_or(|p| self.classes.contains_key(p));
                if ready {
                    log::debug!("auto registered class `{}`", def.name());
                    self.insert(def)?;
                } else {
                    deferred.push(def);
                }
            }

            if deferred.len() == before {
                // Nothing could be inserted: report the first missing parent.
                let def = deferred.swap_remove(0);
                return self.insert(def);
            }
            pending = deferred;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Introspect

impl Introspect for ClassTable {
    #[inline]
    fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    #[inline]
    fn parent(&self, class: &str) -> Option<&str> {
        self.classes.get(class).and_then(ClassDef::parent)
    }

    #[inline]
    fn capability(&self, class: &str) -> Capability {
        self.classes
            .get(class)
            .map(ClassDef::capability)
            .unwrap_or_default()
    }

    #[inline]
    fn class_tags(&self, class: &str) -> &[Tag] {
        self.classes.get(class).map(ClassDef::tags).unwrap_or_default()
    }

    #[inline]
    fn class_docs(&self, class: &str) -> Option<&str> {
        self.classes.get(class).and_then(ClassDef::docs)
    }

    fn properties(&self, class: &str) -> Vec<PropertyInfo<'_>> {
        let mut seen: HashSet<&str> = HashSet::default();
        let mut result = Vec::new();

        for (depth, def) in self.ancestry(class).enumerate() {
            for property in def.properties() {
                if !seen.insert(property.name()) {
                    continue;
                }
                if depth > 0 && property.modifiers().is_private() {
                    continue;
                }
                result.push(PropertyInfo {
                    def: property,
                    declaring_class: def.name(),
                });
            }
        }

        result
    }

    fn methods(&self, class: &str, filter: Modifiers) -> Vec<&MethodDef> {
        let mut seen: HashSet<String> = HashSet::default();
        let mut result = Vec::new();

        for (depth, def) in self.ancestry(class).enumerate() {
            for method in def.methods() {
                if depth > 0 && method.modifiers().is_private() {
                    continue;
                }
                if !seen.insert(method.name().to_ascii_lowercase()) {
                    continue;
                }
                if method.modifiers().visible_in(filter) {
                    result.push(method);
                }
            }
        }

        result
    }

    fn find_method(&self, class: &str, name: &str) -> Option<&MethodDef> {
        self.ancestry(class).find_map(|def| def.method_def(name))
    }

    #[inline]
    fn function(&self, name: &str) -> Option<FunctionFn> {
        self.functions.get(name).cloned()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::ClassTable;
    use crate::{ClassDef, Introspect, MethodDef, Modifiers, PropertyDef, TableError, Value};

    fn hierarchy() -> ClassTable {
        let mut table = ClassTable::new();
        table
            .insert(
                ClassDef::new("A")
                    .property(PropertyDef::protected("shared").default_value("a"))
                    .property(PropertyDef::private("secret").default_value(1))
                    .method(MethodDef::public("getShared", |this, _| this.field_or_null("shared")))
                    .method(MethodDef::private("hidden", |_, _| Value::Null))
                    .method(MethodDef::protected("touch", |_, _| Value::from("a"))),
            )
            .unwrap();
        table
            .insert(
                ClassDef::new("B")
                    .extends("A")
                    .property(PropertyDef::protected("shared").default_value("b"))
                    .property(PropertyDef::public("open"))
                    .method(MethodDef::public("TOUCH", |_, _| Value::from("b"))),
            )
            .unwrap();
        table
    }

    #[test]
    fn insert_rejects_duplicates_and_orphans() {
        let mut table = hierarchy();

        assert_eq!(
            table.insert(ClassDef::new("A")),
            Err(TableError::DuplicateClass("A".into()))
        );
        assert!(matches!(
            table.insert(ClassDef::new("C").extends("Z")),
            Err(TableError::UnknownParent { .. })
        ));
        assert!(matches!(
            table.instantiate("Z"),
            Err(TableError::UnknownClass(_))
        ));
    }

    #[test]
    fn instantiate_prefers_derived_defaults() {
        let table = hierarchy();
        let obj = table.instantiate("B").unwrap();

        assert_eq!(obj.class(), "B");
        assert_eq!(obj.field("shared").and_then(Value::as_str), Some("b"));
        assert_eq!(obj.field("secret").and_then(Value::as_int), Some(1));
        assert!(obj.has_field("open"));
        assert!(!obj.is_initialized("open"));
    }

    #[test]
    fn inherited_private_members_are_hidden() {
        let table = hierarchy();

        let props: Vec<_> = table
            .properties("B")
            .iter()
            .map(|p| (p.def.name(), p.declaring_class))
            .collect();
        assert_eq!(props, [("shared", "B"), ("open", "B")]);

        let methods: Vec<_> = table
            .methods("B", Modifiers::ANY_VISIBILITY)
            .iter()
            .map(|m| m.name())
            .collect();
        assert_eq!(methods, ["TOUCH", "getShared"]);

        // Lookup by name still reaches private ancestors.
        assert!(table.find_method("B", "hidden").is_some());
        assert!(table.find_method("B", "touch").is_some_and(|m| m.name() == "TOUCH"));
    }

    #[test]
    fn method_filter() {
        let table = hierarchy();
        let protected: Vec<_> = table
            .methods("A", Modifiers::PROTECTED)
            .iter()
            .map(|m| m.name())
            .collect();
        assert_eq!(protected, ["touch"]);
    }

    #[test]
    fn functions_are_shared() {
        let mut table = ClassTable::new();
        table.register_function("double", |v| Value::from(v.as_int().unwrap_or(0) * 2));

        let f = table.function("double").unwrap();
        assert_eq!(f(Value::from(21)), Value::from(42));
        assert!(table.function("triple").is_none());
    }

    #[cfg(feature = "auto_register")]
    mod auto {
        use crate::{ClassDef, ClassTable, Introspect};

        fn registered_child() -> ClassDef {
            ClassDef::new("AutoChild").extends("AutoBase")
        }

        fn registered_base() -> ClassDef {
            ClassDef::new("AutoBase").accessible()
        }

        crate::register_class!(registered_child);
        crate::register_class!(registered_base);

        #[test]
        fn auto_register_orders_parents_first() {
            let mut table = ClassTable::new();

            assert_eq!(table.auto_register(), Ok(true));
            assert_eq!(table.parent("AutoChild"), Some("AutoBase"));

            // Second call finds everything in place.
            assert_eq!(table.auto_register(), Ok(true));
        }
    }
}
