use alloc::string::{String, ToString};
use core::fmt;

use acc_host::Value;

/// Token replaced by the property name in mutator method names.
pub const PROPERTY_TOKEN: &str = "%property%";

// -----------------------------------------------------------------------------
// MutatorRef

/// A reference to a mutator callback, as written in a `Mutator` tag.
///
/// | tag argument               | reference                  |
/// |----------------------------|----------------------------|
/// | `"trim"`                   | free function `trim`       |
/// | `"Text::upper"`            | static method of `Text`    |
/// | `"$this->clean"`           | method of the receiver     |
/// | `["Text", "upper"]`        | static method of `Text`    |
/// | `[null, "clean"]`          | method of the receiver     |
/// | `null` or `""`             | no mutator                 |
///
/// Method names may contain `%property%`, replaced by the property name
/// with [`expand`](Self::expand). References are only checked against the
/// declared classes when a property descriptor is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutatorRef {
    Function(String),
    Static { class: String, method: String },
    Bound(String),
}

impl MutatorRef {
    /// Parses a `Mutator` tag argument.
    ///
    /// `Ok(None)` explicitly disables the mutator.
    pub fn parse(arg: &Value) -> Result<Option<Self>, &'static str> {
        match arg {
            Value::Null => Ok(None),
            Value::Str(s) => Self::parse_str(s),
            Value::List(items) => match items.as_slice() {
                [class, Value::Str(method)] if !method.is_empty() => match class {
                    Value::Null => Ok(Some(Self::Bound(method.clone()))),
                    Value::Str(c) if c.is_empty() => Ok(Some(Self::Bound(method.clone()))),
                    Value::Str(c) => Ok(Some(Self::Static {
                        class: c.clone(),
                        method: method.clone(),
                    })),
                    _ => Err("expects a class name or null as first list item"),
                },
                _ => Err("expects a `[class, method]` list"),
            },
            _ => Err("expects a string, a `[class, method]` list or null"),
        }
    }

    fn parse_str(s: &str) -> Result<Option<Self>, &'static str> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }

        if let Some(method) = s.strip_prefix("$this->") {
            return match method {
                "" => Err("missing method name after `$this->`"),
                m => Ok(Some(Self::Bound(m.to_string()))),
            };
        }

        match s.split_once("::") {
            Some(("", _)) | Some((_, "")) => Err("expects `Class::method`"),
            Some((class, method)) => Ok(Some(Self::Static {
                class: class.to_string(),
                method: method.to_string(),
            })),
            None => Ok(Some(Self::Function(s.to_string()))),
        }
    }

    /// Replaces `%property%` in method names.
    ///
    /// Free function names are kept as written.
    pub fn expand(&self, property: &str) -> Self {
        match self {
            Self::Function(name) => Self::Function(name.clone()),
            Self::Static { class, method } => Self::Static {
                class: class.clone(),
                method: method.replace(PROPERTY_TOKEN, property),
            },
            Self::Bound(method) => Self::Bound(method.replace(PROPERTY_TOKEN, property)),
        }
    }
}

impl fmt::Display for MutatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(name) => f.write_str(name),
            Self::Static { class, method } => write!(f, "{class}::{method}"),
            Self::Bound(method) => write!(f, "$this->{method}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use acc_host::Value;

    use super::MutatorRef;

    #[test]
    fn parse_forms() {
        let parse = |v: Value| MutatorRef::parse(&v).unwrap();

        assert_eq!(parse("trim".into()), Some(MutatorRef::Function("trim".into())));
        assert_eq!(parse(" $this->clean ".into()), Some(MutatorRef::Bound("clean".into())));
        assert_eq!(
            parse("Text::upper".into()),
            Some(MutatorRef::Static { class: "Text".into(), method: "upper".into() })
        );
        assert_eq!(parse(Value::list([Value::Null, "m".into()])), Some(MutatorRef::Bound("m".into())));
        assert_eq!(parse(Value::list(["", "m"])), Some(MutatorRef::Bound("m".into())));
        assert_eq!(parse("".into()), None);
        assert_eq!(parse(Value::Null), None);
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in [
            Value::from("$this->"),
            Value::from("::m"),
            Value::from("C::"),
            Value::from(3),
            Value::list(["only"]),
            Value::list([Value::from(1), Value::from("m")]),
        ] {
            assert!(MutatorRef::parse(&bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn expand_property_token() {
        let m = MutatorRef::Bound("mutate%property%".into()).expand("Foo");
        assert_eq!(m.to_string(), "$this->mutateFoo");

        let f = MutatorRef::Function("%property%".into()).expand("foo");
        assert_eq!(f.to_string(), "%property%");
    }
}
