use core::fmt;

// -----------------------------------------------------------------------------
// OptionKind

/// A configurable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Readable,
    Writable,
    Deletable,
    Immutable,
    CaseInsensitive,
    Mutator,
    NamingFormat,
}

impl OptionKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Readable,
        Self::Writable,
        Self::Deletable,
        Self::Immutable,
        Self::CaseInsensitive,
        Self::Mutator,
        Self::NamingFormat,
    ];

    /// The tag identifier configuring this kind.
    pub const fn tag(self) -> &'static str {
        use acc_host::Tag;

        match self {
            Self::Readable => Tag::GET,
            Self::Writable => Tag::SET,
            Self::Deletable => Tag::DELETE,
            Self::Immutable => Tag::IMMUTABLE,
            Self::CaseInsensitive => Tag::ICASE,
            Self::Mutator => Tag::MUTATOR,
            Self::NamingFormat => Tag::FORMAT,
        }
    }

    /// Maps a tag identifier, ignoring case.
    pub fn from_tag(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// -----------------------------------------------------------------------------
// AccessorKind

/// The operation requested by an accessor method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Get,
    Set,
    Isset,
    Unset,
    With,
}

impl AccessorKind {
    /// Every kind, in index order.
    pub const ALL: [Self; 5] = [Self::Get, Self::Set, Self::Isset, Self::Unset, Self::With];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The method prefix of the kind, e.g. `isset`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Isset => "isset",
            Self::Unset => "unset",
            Self::With => "with",
        }
    }

    /// Returns `true` for `set` and `with`.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Set | Self::With)
    }
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessorKind, OptionKind};

    #[test]
    fn tag_lookup_ignores_case() {
        assert_eq!(OptionKind::from_tag("icase"), Some(OptionKind::CaseInsensitive));
        assert_eq!(OptionKind::from_tag("FORMAT"), Some(OptionKind::NamingFormat));
        assert_eq!(OptionKind::from_tag("Validate"), None);
    }

    #[test]
    fn indices_are_dense() {
        for (i, kind) in AccessorKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
