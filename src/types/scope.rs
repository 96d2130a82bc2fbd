// Sat Oct 17 2026 - Alex

use crate::types::{NameFlags, TypeHandle, TypeIdentity};
use std::fmt;

/// A type viewed as a scope. Converting to and from `TypeHandle` is a
/// plain rewrap; both views share one identity.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ScopeHandle {
    handle: TypeHandle,
}

impl ScopeHandle {
    pub fn as_type(&self) -> &TypeHandle {
        &self.handle
    }

    pub fn is_resolved(&self) -> bool {
        self.handle.is_resolved()
    }

    pub fn is_class(&self) -> bool {
        self.handle.is_class()
    }

    pub fn identity(&self) -> Option<TypeIdentity> {
        self.handle.identity()
    }

    pub fn name(&self, flags: NameFlags) -> String {
        self.handle.name(flags)
    }
}

impl From<TypeHandle> for ScopeHandle {
    fn from(handle: TypeHandle) -> Self {
        Self { handle }
    }
}

impl From<ScopeHandle> for TypeHandle {
    fn from(scope: ScopeHandle) -> Self {
        scope.handle
    }
}

impl fmt::Debug for ScopeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeHandle({:?})", self.handle)
    }
}
