// Sat Oct 17 2026 - Alex

use crate::memory::MemoryReader;
use crate::structure::{
    AccessSpecifier, Base, ClassDescription, ClassRegistry, ConstantOffset, Modifiers, ReflectError,
    VirtualBaseOffset, VirtualBaseSlot,
};
use crate::types::{TypeHandle, TypeRegistry};
use std::sync::Arc;

enum PendingBase {
    Fixed { name: String, offset: usize, access: AccessSpecifier },
    Virtual { name: String, index: usize, access: AccessSpecifier },
    Edge(Base),
}

impl PendingBase {
    fn virtual_name(&self) -> Option<&str> {
        match self {
            PendingBase::Virtual { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Generator-side helper that describes one class and registers it.
///
/// Base types are looked up by name and forward declared when unknown.
/// Virtual bases use the registry's configured table layout and pointer
/// size, so a reader for object memory must be supplied.
pub struct ClassBuilder<'a> {
    types: &'a TypeRegistry,
    name: String,
    size: usize,
    vptr_offset: usize,
    reader: Option<Arc<dyn MemoryReader>>,
    bases: Vec<PendingBase>,
}

impl<'a> ClassBuilder<'a> {
    pub fn new(types: &'a TypeRegistry, name: &str, size: usize) -> Self {
        Self {
            types,
            name: name.to_string(),
            size,
            vptr_offset: 0,
            reader: None,
            bases: Vec::new(),
        }
    }

    pub fn with_reader(mut self, reader: Arc<dyn MemoryReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Where this class keeps its virtual-base table pointer.
    pub fn with_vptr_offset(mut self, vptr_offset: usize) -> Self {
        self.vptr_offset = vptr_offset;
        self
    }

    /// Non-virtual base whose subobject starts `offset` bytes in.
    pub fn base(mut self, name: &str, offset: usize, access: AccessSpecifier) -> Self {
        self.bases.push(PendingBase::Fixed { name: name.to_string(), offset, access });
        self
    }

    /// Virtual base stored in slot `index` of the virtual-base table.
    pub fn virtual_base(mut self, name: &str, index: usize, access: AccessSpecifier) -> Self {
        self.bases.push(PendingBase::Virtual { name: name.to_string(), index, access });
        self
    }

    /// Prebuilt edge, for resolvers other than the canonical two.
    pub fn edge(mut self, base: Base) -> Self {
        self.bases.push(PendingBase::Edge(base));
        self
    }

    pub fn register(mut self, classes: &ClassRegistry) -> Result<Arc<ClassDescription>, ReflectError> {
        let config = classes.config();
        let pending_bases = std::mem::take(&mut self.bases);

        // Fail before any base name gets declared.
        let reader = match (&self.reader, pending_bases.iter().find_map(PendingBase::virtual_name)) {
            (None, Some(name)) => {
                return Err(ReflectError::Config(format!(
                    "virtual base {} of {} needs a memory reader",
                    name, self.name
                )));
            }
            (reader, _) => reader.clone(),
        };

        let mut bases = Vec::with_capacity(pending_bases.len());
        for pending in pending_bases {
            let base = match pending {
                PendingBase::Fixed { name, offset, access } => Base::new(
                    self.types.declare(&name),
                    ConstantOffset::shared(offset),
                    Modifiers::from(access),
                ),
                PendingBase::Virtual { name, index, access } => {
                    let slot = VirtualBaseSlot::new(config.vbase_layout, index)
                        .with_vptr_offset(self.vptr_offset)
                        .with_pointer_size(config.pointer_size)?;
                    let reader = reader.clone().ok_or(ReflectError::NoResolver)?;
                    Base::new(
                        self.types.declare(&name),
                        VirtualBaseOffset::shared(slot, reader),
                        Modifiers::from(access) | Modifiers::VIRTUAL,
                    )
                }
                PendingBase::Edge(base) => base,
            };
            bases.push(base);
        }

        let handle = self.class_type()?;
        classes.register(&handle, bases)
    }

    fn class_type(&self) -> Result<TypeHandle, ReflectError> {
        match self.types.by_name(&self.name) {
            Some(handle) if handle.is_class() => Ok(handle),
            _ => self.types.define_class(&self.name, self.size),
        }
    }
}
