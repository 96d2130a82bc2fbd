// Sat Oct 17 2026 - Alex

use crate::memory::Address;
use crate::structure::{Base, ClassRegistry, Offset, ReflectError};
use crate::types::{NameFlags, ScopeHandle, TypeHandle, TypeIdentity};
use ahash::AHashSet;
use std::fmt;

/// A registered class and its direct bases, in declaration order.
#[derive(Debug)]
pub struct ClassDescription {
    handle: TypeHandle,
    bases: Vec<Base>,
}

impl ClassDescription {
    pub(crate) fn new(handle: TypeHandle, bases: Vec<Base>) -> Self {
        Self { handle, bases }
    }

    pub fn type_handle(&self) -> &TypeHandle {
        &self.handle
    }

    pub fn as_scope(&self) -> ScopeHandle {
        self.handle.as_scope()
    }

    pub fn name(&self, flags: NameFlags) -> String {
        self.handle.name(flags)
    }

    pub fn size(&self) -> Option<usize> {
        self.handle.size()
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    pub fn base_at(&self, index: usize) -> Option<&Base> {
        self.bases.get(index)
    }

    pub fn has_virtual_bases(&self) -> bool {
        self.bases.iter().any(|b| b.is_virtual())
    }

    /// Whether `target` is a direct or indirect base of this class.
    pub fn has_base(&self, target: &TypeHandle, registry: &ClassRegistry) -> bool {
        self.base_path(target, registry).is_some()
    }

    /// Chain of edges leading from this class to `target`, depth first
    /// in declaration order. With non-virtual repeated bases the first
    /// path found wins.
    pub fn base_path(&self, target: &TypeHandle, registry: &ClassRegistry) -> Option<Vec<Base>> {
        let target = target.final_type();
        if target.is_null() {
            return None;
        }
        let mut path = Vec::new();
        let mut visited = AHashSet::new();
        if self.find_path(&target, registry, &mut path, &mut visited) {
            Some(path)
        } else {
            None
        }
    }

    /// Each class is explored at most once; a class already visited
    /// without finding `target` cannot lead to it on another path.
    fn find_path(
        &self,
        target: &TypeHandle,
        registry: &ClassRegistry,
        path: &mut Vec<Base>,
        visited: &mut AHashSet<TypeIdentity>,
    ) -> bool {
        if let Some(id) = self.handle.identity() {
            if !visited.insert(id) {
                return false;
            }
        }
        for base in &self.bases {
            path.push(base.clone());
            if base.as_type(true).same_as(target) {
                return true;
            }
            if let Some(class) = base.base_class(registry) {
                if class.find_path(target, registry, path, visited) {
                    return true;
                }
            }
            path.pop();
        }
        false
    }

    /// Displacement from `object`, a complete object of this class, to
    /// its `target` base subobject. Each step hands its resolver the
    /// address of the subobject reached so far.
    pub fn upcast_offset(&self, target: &TypeHandle, object: Address, registry: &ClassRegistry) -> Result<Offset, ReflectError> {
        let path = self.base_path(target, registry).ok_or_else(|| ReflectError::BaseNotFound {
            derived: self.name(NameFlags::SCOPED),
            base: target.name(NameFlags::SCOPED),
        })?;

        let mut current = object;
        let mut total = Offset::zero();
        for edge in &path {
            let step = edge.offset(Some(current))?;
            current = current.adjust(step);
            total = total + step;
        }
        Ok(total)
    }

    pub fn upcast(&self, target: &TypeHandle, object: Address, registry: &ClassRegistry) -> Result<Address, ReflectError> {
        Ok(object.adjust(self.upcast_offset(target, object, registry)?))
    }
}

impl fmt::Display for ClassDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.name(NameFlags::SCOPED))?;
        if !self.bases.is_empty() {
            let bases: Vec<String> = self.bases.iter().map(|b| b.to_string()).collect();
            write!(f, " : {}", bases.join(", "))?;
        }
        if let Some(size) = self.size() {
            write!(f, " // sizeof = 0x{:X}", size)?;
        }
        Ok(())
    }
}
