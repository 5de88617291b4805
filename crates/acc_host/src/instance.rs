use alloc::sync::Arc;
use alloc::vec::Vec;

use serde_core::ser::{Serialize, SerializeMap, Serializer};

use crate::Value;
use crate::hash::HashMap;

// -----------------------------------------------------------------------------
// Instance

/// An object of a declared class.
///
/// Every field declared along the class hierarchy owns a slot, which is
/// either initialized (holding a [`Value`]) or uninitialized.
///
/// The raw field API used here bypasses every accessor rule, the same way
/// code inside a class body can touch its own fields directly. Method bodies
/// registered on a [`ClassDef`](crate::ClassDef) use it to implement
/// endpoints.
///
/// Instances are created through [`ClassTable::instantiate`](crate::ClassTable::instantiate).
/// Cloning an instance produces an independent copy, which is what
/// copy-on-write accessors build upon.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: Arc<str>,
    fields: HashMap<Arc<str>, Option<Value>>,
}

impl Instance {
    #[inline]
    pub(crate) fn new(class: Arc<str>, fields: HashMap<Arc<str>, Option<Value>>) -> Self {
        Self { class, fields }
    }

    /// Returns the name of the instance's class.
    #[inline]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the shared class name.
    #[inline]
    pub fn class_name(&self) -> &Arc<str> {
        &self.class
    }

    /// Returns `true` if the class hierarchy declares a field with this exact name.
    #[inline]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns `true` if the field exists and holds an initialized value.
    #[inline]
    pub fn is_initialized(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(Some(_)))
    }

    /// Returns the field value, or `None` if the field is unknown or uninitialized.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).and_then(Option::as_ref)
    }

    /// Returns the field value, or `Value::Null` if it is unknown or uninitialized.
    pub fn field_or_null(&self, name: &str) -> Value {
        self.field(name).cloned().unwrap_or_default()
    }

    /// Stores a value into a declared field.
    ///
    /// Returns the previous value when the field existed and was initialized.
    /// Returns `Err(value)` back if the field is not declared.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<Option<Value>, Value> {
        let value = value.into();
        match self.fields.get_mut(name) {
            Some(slot) => Ok(slot.replace(value)),
            None => Err(value),
        }
    }

    /// Uninitializes a declared field, returning the value it held.
    pub fn clear_field(&mut self, name: &str) -> Option<Value> {
        self.fields.get_mut(name).and_then(Option::take)
    }

    /// Returns an iterator over `(name, value)` of every declared field.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields
            .iter()
            .map(|(name, value)| (&**name, value.as_ref()))
    }
}

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for Instance {
    /// Serializes as `{ "class": .., "fields": { name: value } }`.
    ///
    /// Uninitialized fields are skipped, fields are sorted by name.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Fields<'a>(Vec<(&'a str, &'a Value)>);

        impl Serialize for Fields<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (name, value) in &self.0 {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }

        let mut fields: Vec<(&str, &Value)> = self
            .fields
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (&**name, v)))
            .collect();
        fields.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("class", &*self.class)?;
        map.serialize_entry("fields", &Fields(fields))?;
        map.end()
    }
}
