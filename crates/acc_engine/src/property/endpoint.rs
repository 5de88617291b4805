use alloc::string::String;
use alloc::sync::Arc;

use acc_host::hash::HashMap;
use acc_host::{Introspect, Modifiers};

use crate::format::NamingFormat;
use crate::meta::AccessorKind;

// -----------------------------------------------------------------------------
// Endpoints

/// The names of the user methods handling the accessor kinds of one property.
///
/// Names are looked up on the receiver's class when called, so an override
/// in a descendant runs instead of the method that was discovered.
#[derive(Debug, Clone, Default)]
pub struct Endpoints {
    methods: [Option<Arc<str>>; 5],
}

impl Endpoints {
    /// Returns the endpoint of a kind.
    #[inline]
    pub fn get(&self, kind: AccessorKind) -> Option<&str> {
        self.methods[kind.index()].as_deref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.methods.iter().all(Option::is_none)
    }

    /// Iterates over `(kind, method name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (AccessorKind, &str)> {
        AccessorKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|m| (kind, m)))
    }
}

/// Scans the public and protected instance methods visible on `class`.
///
/// Returns the endpoints keyed by lowercase property name. When two
/// methods claim the same property and kind, the first one listed wins.
pub(crate) fn discover_endpoints(
    introspect: &dyn Introspect,
    class: &str,
    format: &dyn NamingFormat,
) -> HashMap<String, Endpoints> {
    let mut table: HashMap<String, Endpoints> = HashMap::default();

    for method in introspect.methods(class, Modifiers::PUBLIC | Modifiers::PROTECTED) {
        if method.modifiers().is_static() {
            continue;
        }
        let Some(matched) = format.match_endpoint_candidate(method.name()) else {
            continue;
        };
        if matched.suffix.is_empty() {
            continue;
        }

        let slot = &mut table
            .entry(matched.suffix.to_lowercase())
            .or_default()
            .methods[matched.kind.index()];

        if slot.is_none() {
            log::trace!(
                "`{class}::{}` handles `{}` of `{}`",
                method.name(),
                matched.kind,
                matched.suffix
            );
            *slot = Some(method.shared_name().clone());
        }
    }

    table
}
