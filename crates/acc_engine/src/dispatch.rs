//! Attribute access and accessor method calls.
//!
//! Parsing follows the class's [`NamingFormat`](crate::format::NamingFormat);
//! every target of a call is validated before the receiver is touched, so a
//! failing batch leaves it unchanged.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::{IntoIter, Vec};

use acc_host::{Instance, Value};

use crate::class::{ClassConfig, check_deletion, gate};
use crate::meta::AccessorKind;
use crate::property::PropertyDescriptor;
use crate::{AccessError, ArityError, Operation};

// -----------------------------------------------------------------------------
// Outcome

/// The result of [`Registry::call`](crate::Registry::call).
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A read, or the return value of a public method.
    Value(Value),
    /// An existence check.
    Exists(bool),
    /// The receiver was modified in place by `set` or `unset`.
    Updated,
    /// A modified copy of the receiver made by `with`; the receiver is untouched.
    Derived(Instance),
}

impl Outcome {
    #[inline]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub const fn exists(&self) -> Option<bool> {
        match self {
            Self::Exists(exists) => Some(*exists),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }

    #[inline]
    pub fn into_derived(self) -> Option<Instance> {
        match self {
            Self::Derived(instance) => Some(instance),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Attribute surface

#[inline]
fn lookup<'c>(config: &'c ClassConfig, name: &str) -> Option<&'c PropertyDescriptor> {
    config
        .find(name, config.is_case_insensitive())
        .map(Arc::as_ref)
}

pub(crate) fn get(config: &ClassConfig, receiver: &mut Instance, name: &str) -> Result<Value, AccessError> {
    config.read(receiver, name, lookup(config, name))
}

pub(crate) fn isset(config: &ClassConfig, receiver: &mut Instance, name: &str) -> Result<bool, AccessError> {
    config.exists(receiver, name, lookup(config, name))
}

pub(crate) fn unset(config: &ClassConfig, receiver: &mut Instance, name: &str) -> Result<(), AccessError> {
    config.delete(receiver, name, lookup(config, name))
}

pub(crate) fn set(
    config: &ClassConfig,
    receiver: &mut Instance,
    name: &str,
    value: Value,
) -> Result<(), AccessError> {
    let property = lookup(config, name);

    if property.is_some_and(PropertyDescriptor::is_immutable) {
        return Err(AccessError::ImmutableAssignment {
            class: config.shared_name().clone(),
            property: name.to_string(),
        });
    }

    config.write(receiver, AccessorKind::Set, name, value, property)?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Method calls

/// What a parsed call applies to.
#[derive(Debug)]
enum Targets {
    /// Property names, for `get`, `isset` and `unset`.
    Names(Vec<String>),
    /// Property names with values, for `set` and `with`.
    Values(Vec<(String, Value)>),
}

#[derive(Debug)]
struct ParsedCall {
    kind: AccessorKind,
    case_insensitive: bool,
    targets: Targets,
}

pub(crate) fn call(
    config: &ClassConfig,
    receiver: &mut Instance,
    method: &str,
    args: Vec<Value>,
) -> Result<Outcome, AccessError> {
    if let Some(native) = config.native_method(method) {
        return Ok(Outcome::Value(native.invoke(receiver, args)));
    }

    if !config.is_enabled() {
        return Err(AccessError::NotAccessible(config.shared_name().clone()));
    }

    let call = parse_call(config, method, args)?;
    log::trace!(
        "`{}::{method}()` parsed as `{}` on {:?}",
        config.name(),
        call.kind,
        call.targets,
    );

    match call.targets {
        Targets::Names(names) => {
            let targets = names
                .into_iter()
                .map(|name| {
                    let property = config
                        .find(&name, call.case_insensitive)
                        .map(Arc::as_ref);
                    (name, property)
                })
                .collect::<Vec<_>>();

            match call.kind {
                AccessorKind::Get => {
                    let mut value = Value::Null;
                    for (name, property) in targets {
                        value = config.read(receiver, &name, property)?;
                    }
                    Ok(Outcome::Value(value))
                }
                AccessorKind::Isset => {
                    let mut exists = false;
                    for (name, property) in targets {
                        exists = config.exists(receiver, &name, property)?;
                    }
                    Ok(Outcome::Exists(exists))
                }
                _ => {
                    for (name, property) in &targets {
                        let property = gate(config.shared_name(), name, *property, Operation::Delete)?;
                        check_deletion(config.shared_name(), name, property)?;
                    }
                    for (name, property) in targets {
                        config.delete(receiver, &name, property)?;
                    }
                    Ok(Outcome::Updated)
                }
            }
        }
        Targets::Values(values) => {
            let kind = call.kind;
            let mut targets = Vec::with_capacity(values.len());

            for (name, value) in values {
                let property = config
                    .find(&name, call.case_insensitive)
                    .map(Arc::as_ref);
                check_write(config, kind, &name, property)?;
                targets.push((name, value, property));
            }

            if kind == AccessorKind::With {
                let mut derived = receiver.clone();
                for (name, value, property) in targets {
                    if let Some(replacement) = config.write(&mut derived, kind, &name, value, property)? {
                        derived = replacement;
                    }
                }
                Ok(Outcome::Derived(derived))
            } else {
                for (name, value, property) in targets {
                    config.write(receiver, kind, &name, value, property)?;
                }
                Ok(Outcome::Updated)
            }
        }
    }
}

/// Unknown property, then method consistency, then the write gate.
fn check_write(
    config: &ClassConfig,
    kind: AccessorKind,
    name: &str,
    property: Option<&PropertyDescriptor>,
) -> Result<(), AccessError> {
    let class = config.shared_name();

    let Some(property) = property else {
        return Err(AccessError::UnknownProperty {
            class: class.clone(),
            property: name.to_string(),
            op: Operation::Write,
        });
    };

    let expected = if property.is_immutable() {
        AccessorKind::With
    } else {
        AccessorKind::Set
    };
    if kind != expected {
        return Err(AccessError::MethodConsistency {
            class: class.clone(),
            property: name.to_string(),
            used: kind,
            expected,
        });
    }

    gate(class, name, Some(property), Operation::Write)?;
    Ok(())
}

fn parse_call(config: &ClassConfig, method: &str, args: Vec<Value>) -> Result<ParsedCall, AccessError> {
    let class = config.shared_name();
    let format = config.format();
    let n_args = args.len();

    let (mut kind, suffix) = match format.match_called(method) {
        Some(matched) => (Some(matched.kind), matched.suffix),
        None => (None, method.to_string()),
    };

    let batch_kind = matches!(
        kind,
        Some(AccessorKind::Set | AccessorKind::With | AccessorKind::Unset)
    );

    if let Some(batch) = kind.filter(|_| batch_kind)
        && suffix.is_empty()
        && args.first().is_some_and(Value::is_container)
    {
        if n_args > 1 {
            return Err(ArityError::BatchWithExtraArguments {
                class: class.clone(),
                method: method.to_string(),
            }
            .into());
        }
        let container = args.into_iter().next().unwrap_or_default();
        let targets = batch_targets(class, method, batch, container)?;

        return Ok(ParsedCall {
            kind: batch,
            case_insensitive: config.is_case_insensitive(),
            targets,
        });
    }

    if kind.is_none() && format.allow_bare_property_call() && config.find(&suffix, true).is_some() {
        kind = Some(if n_args > 0 {
            AccessorKind::Set
        } else {
            AccessorKind::Get
        });
    }

    let Some(kind) = kind else {
        return Err(AccessError::UnknownMethod {
            class: class.clone(),
            method: method.to_string(),
        });
    };

    let mut args = args.into_iter();

    let (name, case_insensitive) = if suffix.is_empty() {
        match args.next() {
            None => {
                return Err(ArityError::MissingPropertyName {
                    class: class.clone(),
                    method: method.to_string(),
                }
                .into());
            }
            Some(Value::Str(name)) => (name, config.is_case_insensitive()),
            // Numbered as the count of arguments left after the name, plus one.
            Some(_) => {
                return Err(ArityError::PropertyNameNotString {
                    class: class.clone(),
                    method: method.to_string(),
                    position: args.len() + 1,
                }
                .into());
            }
        }
    } else {
        (suffix, true)
    };

    let value = if kind.is_write() {
        let Some(value) = args.next() else {
            return Err(ArityError::MissingValue {
                class: class.clone(),
                method: method.to_string(),
                position: n_args + 1,
            }
            .into());
        };
        Some(value)
    } else {
        None
    };

    check_exhausted(class, method, n_args, args)?;

    let targets = match value {
        Some(value) => Targets::Values(Vec::from([(name, value)])),
        None => Targets::Names(Vec::from([name])),
    };

    Ok(ParsedCall {
        kind,
        case_insensitive,
        targets,
    })
}

fn check_exhausted(
    class: &Arc<str>,
    method: &str,
    n_args: usize,
    rest: IntoIter<Value>,
) -> Result<(), ArityError> {
    let remaining = rest.len();
    if remaining > 0 {
        return Err(ArityError::TooManyArguments {
            class: class.clone(),
            method: method.to_string(),
            expected: n_args - remaining,
        });
    }
    Ok(())
}

fn batch_targets(
    class: &Arc<str>,
    method: &str,
    kind: AccessorKind,
    container: Value,
) -> Result<Targets, ArityError> {
    let non_string = |key: &Value| ArityError::NonStringKey {
        class: class.clone(),
        method: method.to_string(),
        key: key.to_string(),
    };

    if kind.is_write() {
        let entries = match container {
            Value::Map(entries) => entries,
            Value::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (Value::Int(index as i64), item))
                .collect(),
            _ => Vec::new(),
        };

        let values = entries
            .into_iter()
            .map(|(key, value)| match key {
                Value::Str(name) => Ok((name, value)),
                key => Err(non_string(&key)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Targets::Values(values))
    } else {
        let items = match container {
            Value::List(items) => items,
            Value::Map(entries) => entries.into_iter().map(|(_, value)| value).collect(),
            _ => Vec::new(),
        };

        let names = items
            .into_iter()
            .map(|item| match item {
                Value::Str(name) => Ok(name),
                item => Err(non_string(&item)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Targets::Names(names))
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;
    use acc_host::Value;

    #[test]
    fn outcome_accessors() {
        assert_eq!(Outcome::Value(Value::Int(3)).into_value(), Some(Value::Int(3)));
        assert_eq!(Outcome::Exists(true).exists(), Some(true));
        assert_eq!(Outcome::Updated.exists(), None);
        assert!(Outcome::Updated.is_updated());
        assert!(Outcome::Updated.into_derived().is_none());
    }
}
