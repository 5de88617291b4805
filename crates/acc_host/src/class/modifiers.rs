use bitflags::bitflags;

bitflags! {
    /// Modifiers of a class member.
    ///
    /// Also used as a filter when enumerating members, e.g.
    /// `Modifiers::PUBLIC | Modifiers::PROTECTED` selects every member
    /// visible to subclasses.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const PUBLIC    = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE   = 1 << 2;
        /// Member belongs to the class rather than to instances.
        const STATIC    = 1 << 3;
    }
}

impl Modifiers {
    /// Every visibility flag.
    pub const ANY_VISIBILITY: Self = Self::PUBLIC.union(Self::PROTECTED).union(Self::PRIVATE);

    /// Returns `true` if the member's visibility is selected by `filter`.
    ///
    /// The `STATIC` flag of `filter` is ignored.
    #[inline]
    pub const fn visible_in(self, filter: Self) -> bool {
        self.intersects(filter.intersection(Self::ANY_VISIBILITY))
    }

    #[inline]
    pub const fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    #[inline]
    pub const fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }
}
