// Sat Oct 17 2026 - Alex

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Inheritance modifiers of a base edge.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const VIRTUAL = 1 << 3;

        const ACCESS = Self::PUBLIC.bits() | Self::PROTECTED.bits() | Self::PRIVATE.bits();
    }
}

/// C++ access specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSpecifier {
    Public,
    Protected,
    Private,
}

impl AccessSpecifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessSpecifier::Public => "public",
            AccessSpecifier::Protected => "protected",
            AccessSpecifier::Private => "private",
        }
    }
}

impl fmt::Display for AccessSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AccessSpecifier> for Modifiers {
    fn from(access: AccessSpecifier) -> Self {
        match access {
            AccessSpecifier::Public => Modifiers::PUBLIC,
            AccessSpecifier::Protected => Modifiers::PROTECTED,
            AccessSpecifier::Private => Modifiers::PRIVATE,
        }
    }
}

impl Modifiers {
    /// The access specifier, if exactly one access bit is set.
    pub fn access(&self) -> Option<AccessSpecifier> {
        let access = self.intersection(Modifiers::ACCESS);
        if access == Modifiers::PUBLIC {
            Some(AccessSpecifier::Public)
        } else if access == Modifiers::PROTECTED {
            Some(AccessSpecifier::Protected)
        } else if access == Modifiers::PRIVATE {
            Some(AccessSpecifier::Private)
        } else {
            None
        }
    }

    pub fn has_single_access(&self) -> bool {
        self.access().is_some()
    }
}
