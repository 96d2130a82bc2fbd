// Sat Oct 17 2026 - Alex

use crate::structure::ReflectError;
use crate::types::{TypeHandle, TypeKind};
use indexmap::IndexMap;
use log::{debug, trace};
use parking_lot::RwLock;

/// Owns the name to type-handle table.
///
/// Names may be declared (forward declarations) before they are
/// defined; the handle returned by `declare` is the one that gets
/// resolved by the later `define_*` call.
pub struct TypeRegistry {
    types: RwLock<IndexMap<String, TypeHandle>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            types: RwLock::new(IndexMap::new()),
        }
    }

    /// Returns the handle for `name`, creating an unresolved one if the
    /// name is unknown.
    pub fn declare(&self, name: &str) -> TypeHandle {
        if let Some(handle) = self.types.read().get(name) {
            return handle.clone();
        }
        let mut types = self.types.write();
        types
            .entry(name.to_string())
            .or_insert_with(|| {
                trace!("Declared type {}", name);
                TypeHandle::declared(name)
            })
            .clone()
    }

    pub fn define_class(&self, name: &str, size: usize) -> Result<TypeHandle, ReflectError> {
        self.define(name, TypeKind::Class { size })
    }

    pub fn define_fundamental(&self, name: &str, size: usize) -> Result<TypeHandle, ReflectError> {
        self.define(name, TypeKind::Fundamental { size })
    }

    pub fn define_typedef(&self, name: &str, target: &TypeHandle) -> Result<TypeHandle, ReflectError> {
        if target.is_null() {
            return Err(ReflectError::UnresolvedBase(name.to_string()));
        }
        // Check and define under one lock so no concurrent definition can
        // close a loop.
        let mut types = self.types.write();
        let handle = types
            .entry(name.to_string())
            .or_insert_with(|| TypeHandle::declared(name))
            .clone();

        let mut current = target.clone();
        loop {
            if current.same_as(&handle) {
                return Err(ReflectError::TypedefCycle(name.to_string()));
            }
            match current.kind() {
                Some(TypeKind::Typedef(next)) => current = next.clone(),
                _ => break,
            }
        }

        if !handle.resolve(TypeKind::Typedef(target.clone())) {
            return Err(ReflectError::TypeAlreadyDefined(name.to_string()));
        }
        debug!("Defined typedef {} -> {}", name, target);
        Ok(handle)
    }

    fn define(&self, name: &str, kind: TypeKind) -> Result<TypeHandle, ReflectError> {
        let handle = self.declare(name);
        if !handle.resolve(kind) {
            return Err(ReflectError::TypeAlreadyDefined(name.to_string()));
        }
        debug!("Defined type {} ({:?})", name, handle.kind());
        Ok(handle)
    }

    pub fn by_name(&self, name: &str) -> Option<TypeHandle> {
        self.types.read().get(name).cloned()
    }

    /// Declared but not yet defined types, in declaration order.
    pub fn unresolved(&self) -> Vec<TypeHandle> {
        self.types
            .read()
            .values()
            .filter(|h| !h.is_resolved())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
