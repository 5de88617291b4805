use crate::format::{MatchedMethod, NamingFormat, strip_prefix};
use crate::meta::AccessorKind;

const PREFIXES: [(&str, AccessorKind); 5] = [
    ("isset_", AccessorKind::Isset),
    ("unset_", AccessorKind::Unset),
    ("with_", AccessorKind::With),
    ("get_", AccessorKind::Get),
    ("set_", AccessorKind::Set),
];

/// A snake-case format: `get_foo`, `set_foo`, `with_foo`, `isset_foo` and
/// `unset_foo`, plus the general `get`, `set`, `with`, `isset` and `unset`.
///
/// Bare `<property>()` calls are not allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCase;

impl SnakeCase {
    pub const NAME: &'static str = "snake_case";
}

impl NamingFormat for SnakeCase {
    #[inline]
    fn name(&self) -> &str {
        Self::NAME
    }

    fn match_called(&self, method: &str) -> Option<MatchedMethod> {
        if let Some(kind) = AccessorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(method))
        {
            return Some(MatchedMethod::new(kind, ""));
        }

        match strip_prefix(method, &PREFIXES)? {
            (_, "") => None,
            (kind, suffix) => Some(MatchedMethod::new(kind, suffix)),
        }
    }

    #[inline]
    fn allow_bare_property_call(&self) -> bool {
        false
    }
}
