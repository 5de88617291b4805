use crate::format::{MatchedMethod, NamingFormat, strip_prefix};
use crate::meta::AccessorKind;

/// Prefixes in matching order: `isset` and `unset` come first.
const PREFIXES: [(&str, AccessorKind); 5] = [
    ("isset", AccessorKind::Isset),
    ("unset", AccessorKind::Unset),
    ("with", AccessorKind::With),
    ("get", AccessorKind::Get),
    ("set", AccessorKind::Set),
];

/// The default camel-case format.
///
/// - `get[<property>]`, `isset[<property>]`: getters.
/// - `set[<property>]`, `with[<property>]`: setters.
/// - `unset[<property>]`: unsetter.
///
/// Bare `<property>()` calls are allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Standard;

impl Standard {
    pub const NAME: &'static str = "standard";
}

impl NamingFormat for Standard {
    #[inline]
    fn name(&self) -> &str {
        Self::NAME
    }

    fn match_called(&self, method: &str) -> Option<MatchedMethod> {
        strip_prefix(method, &PREFIXES).map(|(kind, suffix)| MatchedMethod::new(kind, suffix))
    }

    #[inline]
    fn allow_bare_property_call(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Standard;
    use crate::format::{MatchedMethod, NamingFormat};
    use crate::meta::AccessorKind;

    #[test]
    fn prefixes_ignore_case() {
        let f = Standard;
        assert_eq!(f.match_called("GETfoo"), Some(MatchedMethod::new(AccessorKind::Get, "foo")));
        assert_eq!(f.match_called("WithBar"), Some(MatchedMethod::new(AccessorKind::With, "Bar")));
        assert_eq!(f.match_called("unsetX"), Some(MatchedMethod::new(AccessorKind::Unset, "X")));
    }

    #[test]
    fn longer_prefixes_first() {
        // "settings" is `set` + "tings", "issetter" is `isset` + "ter".
        let f = Standard;
        assert_eq!(f.match_called("settings").map(|m| m.kind), Some(AccessorKind::Set));
        assert_eq!(f.match_called("issetter").map(|m| m.kind), Some(AccessorKind::Isset));
        assert_eq!(f.match_called("is"), None);
        assert_eq!(f.match_called(""), None);
    }

    #[test]
    fn non_ascii_names() {
        assert_eq!(Standard.match_called("gé"), None);
        assert_eq!(
            Standard.match_called("getÉté"),
            Some(MatchedMethod::new(AccessorKind::Get, "Été"))
        );
    }
}
