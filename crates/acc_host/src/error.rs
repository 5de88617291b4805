use alloc::sync::Arc;

use thiserror::Error;

// -----------------------------------------------------------------------------
// TableError

/// Failure to insert a class into, or instantiate a class from, a
/// [`ClassTable`](crate::ClassTable).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("class `{0}` is already declared")]
    DuplicateClass(Arc<str>),

    #[error("class `{class}` extends undeclared class `{parent}`")]
    UnknownParent { class: Arc<str>, parent: Arc<str> },

    #[error("class `{0}` is not declared")]
    UnknownClass(Arc<str>),
}
