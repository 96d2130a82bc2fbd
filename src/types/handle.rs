// Sat Oct 17 2026 - Alex

use crate::types::name::{unscoped, NameFlags};
use crate::types::ScopeHandle;
use once_cell::sync::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// What a resolved type is.
#[derive(Debug, Clone)]
pub enum TypeKind {
    Class { size: usize },
    Typedef(TypeHandle),
    Fundamental { size: usize },
}

#[derive(Debug)]
pub(crate) struct TypeEntry {
    name: String,
    kind: OnceCell<TypeKind>,
}

/// Stable identity of a type entry, usable as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentity(usize);

/// Reference to a type description.
///
/// A handle may be declared before its type is defined. Defining it
/// later fills in the same entry, so every copy of the handle observes
/// the resolution and identity never changes. The default handle is
/// null: never resolved, empty name.
#[derive(Clone, Default)]
pub struct TypeHandle {
    entry: Option<Arc<TypeEntry>>,
}

impl TypeHandle {
    pub fn null() -> Self {
        Self { entry: None }
    }

    pub(crate) fn declared(name: &str) -> Self {
        Self {
            entry: Some(Arc::new(TypeEntry {
                name: name.to_string(),
                kind: OnceCell::new(),
            })),
        }
    }

    /// Fills in the description. Returns false if it was already set.
    pub(crate) fn resolve(&self, kind: TypeKind) -> bool {
        match &self.entry {
            Some(entry) => entry.kind.set(kind).is_ok(),
            None => false,
        }
    }

    pub fn is_null(&self) -> bool {
        self.entry.is_none()
    }

    pub fn is_resolved(&self) -> bool {
        self.kind().is_some()
    }

    pub fn kind(&self) -> Option<&TypeKind> {
        self.entry.as_ref().and_then(|e| e.kind.get())
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind(), Some(TypeKind::Class { .. }))
    }

    pub fn is_typedef(&self) -> bool {
        matches!(self.kind(), Some(TypeKind::Typedef(_)))
    }

    pub fn size(&self) -> Option<usize> {
        match self.final_type().kind()? {
            TypeKind::Class { size } | TypeKind::Fundamental { size } => Some(*size),
            TypeKind::Typedef(_) => None,
        }
    }

    pub fn identity(&self) -> Option<TypeIdentity> {
        self.entry
            .as_ref()
            .map(|e| TypeIdentity(Arc::as_ptr(e) as *const () as usize))
    }

    pub fn same_as(&self, other: &TypeHandle) -> bool {
        match (&self.entry, &other.entry) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Follows typedefs to the underlying type. Stops at the first
    /// unresolved link. Typedef chains are acyclic; `TypeRegistry`
    /// rejects definitions that would close a loop.
    pub fn final_type(&self) -> TypeHandle {
        let mut current = self.clone();
        while let Some(TypeKind::Typedef(target)) = current.kind() {
            current = target.clone();
        }
        current
    }

    /// Declared name, scoped. Empty for the null handle.
    pub fn declared_name(&self) -> &str {
        self.entry.as_ref().map(|e| e.name.as_str()).unwrap_or("")
    }

    pub fn name(&self, flags: NameFlags) -> String {
        let handle = if flags.contains(NameFlags::FINAL) {
            self.final_type()
        } else {
            self.clone()
        };
        let full = handle.declared_name();
        if flags.contains(NameFlags::SCOPED) {
            full.to_string()
        } else {
            unscoped(full).to_string()
        }
    }

    pub fn as_scope(&self) -> ScopeHandle {
        ScopeHandle::from(self.clone())
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHandle")
            .field("name", &self.declared_name())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.declared_name())
    }
}
