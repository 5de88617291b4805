//! Items used by exported macros. Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::ClassDef;

    pub use inventory;

    /// A class submitted with `register_class!`.
    pub struct __ClassRegistration(pub fn() -> ClassDef);

    inventory::collect!(__ClassRegistration);

    pub fn __registered() -> impl Iterator<Item = ClassDef> {
        inventory::iter::<__ClassRegistration>
            .into_iter()
            .map(|registration| (registration.0)())
    }
}

/// Submits a class declaration to [`ClassTable::auto_register`](crate::ClassTable::auto_register).
///
/// The argument is a function returning the [`ClassDef`](crate::ClassDef).
/// Without the `auto_register` feature the macro expands to nothing.
///
/// # Examples
///
/// ```
/// use acc_host::{ClassDef, ClassTable, Introspect, register_class};
///
/// fn user() -> ClassDef {
///     ClassDef::new("User").accessible()
/// }
///
/// register_class!(user);
///
/// let mut table = ClassTable::new();
/// if table.auto_register().unwrap() {
///     assert!(table.contains("User"));
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_class {
    ($builder:path) => {
        $crate::__macro_exports::auto_register::inventory::submit! {
            $crate::__macro_exports::auto_register::__ClassRegistration($builder)
        }
    };
}

/// Submits a class declaration to [`ClassTable::auto_register`](crate::ClassTable::auto_register).
///
/// The `auto_register` feature is disabled: this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! register_class {
    ($builder:path) => {};
}
