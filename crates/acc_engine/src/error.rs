use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use thiserror::Error;

use crate::meta::{AccessorKind, OptionKind};

// -----------------------------------------------------------------------------
// Operation

/// The operation an access error was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Reads and existence checks.
    Read,
    /// `set` and `with` writes.
    Write,
    Delete,
}

impl Operation {
    /// The tag enabling the operation.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Read => acc_host::Tag::GET,
            Self::Write => acc_host::Tag::SET,
            Self::Delete => acc_host::Tag::DELETE,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "get",
            Self::Write => "set",
            Self::Delete => "unset",
        })
    }
}

// -----------------------------------------------------------------------------
// ConfigError

/// A class whose accessor configuration can't be built.
///
/// Raised when the configuration is first built and cached along with it,
/// so every later access to the class reports the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid mutator `{mutator}` for property `{class}::{property}`")]
    InvalidMutator {
        class: Arc<str>,
        property: Arc<str>,
        mutator: String,
    },

    #[error(
        "class `{class}` can't declare `{option}`: it can occur only once, on `{root}` at the top of the hierarchy"
    )]
    OptionRedeclared {
        root: Arc<str>,
        class: Arc<str>,
        option: OptionKind,
    },

    #[error("`{option}` can't be disabled once declared (on {target})")]
    SwitchDisabled { target: String, option: OptionKind },

    #[error("unknown naming format `{format}` (on {target})")]
    UnknownFormat { target: String, format: String },

    #[error("invalid arguments to tag `{tag}` (on {target}): {reason}")]
    InvalidTagArgument {
        target: String,
        tag: String,
        reason: &'static str,
    },

    #[error("class `{class}` extends undeclared class `{parent}`")]
    UnknownParent { class: Arc<str>, parent: Arc<str> },

    #[error("inheritance cycle through class `{0}`")]
    InheritanceCycle(Arc<str>),
}

// -----------------------------------------------------------------------------
// ArityError

/// Wrong arguments to an accessor method call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArityError {
    #[error("missing argument #1 (property name) to method `{class}::{method}()`")]
    MissingPropertyName { class: Arc<str>, method: String },

    #[error("expecting string as argument #{position} (property name) to method `{class}::{method}()`")]
    PropertyNameNotString {
        class: Arc<str>,
        method: String,
        position: usize,
    },

    #[error("missing argument #{position} (property value) to method `{class}::{method}()`")]
    MissingValue {
        class: Arc<str>,
        method: String,
        position: usize,
    },

    #[error("expecting exactly {expected} argument(s) to method `{class}::{method}()`")]
    TooManyArguments {
        class: Arc<str>,
        method: String,
        expected: usize,
    },

    #[error(
        "when the first argument to method `{class}::{method}()` is a container there can't be more arguments"
    )]
    BatchWithExtraArguments { class: Arc<str>, method: String },

    #[error("container passed to method `{class}::{method}()` holds non-string property `{key}`")]
    NonStringKey {
        class: Arc<str>,
        method: String,
        key: String,
    },
}

// -----------------------------------------------------------------------------
// AccessError

/// A failed accessor operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("class `{0}` is not declared")]
    UnknownClass(Arc<str>),

    #[error("class `{0}` does not use the accessor capability")]
    NotAccessible(Arc<str>),

    #[error("tried to {op} unknown property `{class}::{property}`")]
    UnknownProperty {
        class: Arc<str>,
        property: String,
        op: Operation,
    },

    #[error("tried to {op} misconfigured property `{class}::{property}` (missing `{}` tag?)", .op.tag())]
    MisconfiguredProperty {
        class: Arc<str>,
        property: String,
        op: Operation,
    },

    #[error("tried to {op} public property `{class}::{property}`")]
    PublicProperty {
        class: Arc<str>,
        property: String,
        op: Operation,
    },

    #[error(
        "property `{class}::{property}` can't be written with `{used}`, use `{expected}` instead"
    )]
    MethodConsistency {
        class: Arc<str>,
        property: String,
        used: AccessorKind,
        expected: AccessorKind,
    },

    #[error("immutable property `{class}::{property}` can't be unset")]
    ImmutableUnset { class: Arc<str>, property: String },

    #[error("immutable property `{class}::{property}` can't be assigned directly (use `with` instead)")]
    ImmutableAssignment { class: Arc<str>, property: String },

    #[error("unknown accessor method `{class}::{method}()`")]
    UnknownMethod { class: Arc<str>, method: String },

    #[error(transparent)]
    Arity(#[from] ArityError),
}
