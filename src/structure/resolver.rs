// Sat Oct 17 2026 - Alex

use crate::memory::{Address, MemoryReader};
use crate::structure::{Offset, ReflectError};
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Computes the displacement from a derived object to one of its base
/// subobjects.
///
/// One resolver is generated per (derived, base) pair and shared by
/// every edge describing that pair.
pub trait OffsetResolver: Send + Sync {
    /// Displacement in bytes from `object` to the base subobject.
    ///
    /// Resolvers that depend on the object require `object` to be the
    /// address of the subobject whose class declares the edge, inside a
    /// live complete object.
    fn compute(&self, object: Option<Address>) -> Result<Offset, ReflectError>;

    /// Whether the result depends on the object.
    fn is_dynamic(&self) -> bool {
        false
    }

    fn describe(&self) -> String;
}

impl fmt::Debug for dyn OffsetResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Offset fixed at layout time. Used for every non-virtual base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantOffset {
    offset: Offset,
}

impl ConstantOffset {
    pub fn new(offset: impl Into<Offset>) -> Self {
        Self { offset: offset.into() }
    }

    pub fn shared(offset: impl Into<Offset>) -> Arc<dyn OffsetResolver> {
        Arc::new(Self::new(offset))
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }
}

impl OffsetResolver for ConstantOffset {
    fn compute(&self, _object: Option<Address>) -> Result<Offset, ReflectError> {
        Ok(self.offset)
    }

    fn describe(&self) -> String {
        format!("constant {}", self.offset)
    }
}

/// How virtual-base offsets are stored in an object's bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VbaseTableLayout {
    /// Pointer to the vtable's address point at `vptr_offset`. Slot `i`
    /// is the pointer-sized entry at `-(3 + i)` pointers from the address
    /// point, below offset-to-top and the RTTI pointer.
    #[default]
    Itanium,
    /// Pointer to a vbtable at `vptr_offset`. Entry 0 holds the vbptr's
    /// own displacement, virtual bases start at entry 1. Entries are
    /// 32-bit and relative to the vbptr.
    Msvc,
    /// Pointer to a plain table of pointer-sized offsets at
    /// `vptr_offset`; slot `i` is entry `i`.
    Direct,
}

/// Where one virtual base's offset lives for a (derived, base) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualBaseSlot {
    pub layout: VbaseTableLayout,
    /// Offset of the table pointer inside the object.
    pub vptr_offset: usize,
    /// Slot of this base in the table.
    pub index: usize,
    /// 4 or 8.
    pub pointer_size: usize,
}

impl VirtualBaseSlot {
    pub fn new(layout: VbaseTableLayout, index: usize) -> Self {
        Self {
            layout,
            vptr_offset: 0,
            index,
            pointer_size: 8,
        }
    }

    pub fn with_vptr_offset(mut self, vptr_offset: usize) -> Self {
        self.vptr_offset = vptr_offset;
        self
    }

    pub fn with_pointer_size(mut self, pointer_size: usize) -> Result<Self, ReflectError> {
        if pointer_size != 4 && pointer_size != 8 {
            return Err(ReflectError::Config(format!("pointer size must be 4 or 8, got {}", pointer_size)));
        }
        self.pointer_size = pointer_size;
        Ok(self)
    }

    /// Address of the slot, given the table pointer read from the object.
    fn entry_address(&self, table: Address) -> Address {
        let ps = self.pointer_size as u64;
        let index = self.index as u64;
        match self.layout {
            VbaseTableLayout::Itanium => table - (3 + index) * ps,
            VbaseTableLayout::Msvc => table + index * 4,
            VbaseTableLayout::Direct => table + index * ps,
        }
    }

    fn read_table_pointer(&self, reader: &dyn MemoryReader, object: Address) -> Result<Address, ReflectError> {
        let at = object + self.vptr_offset as u64;
        let table = match self.pointer_size {
            4 => Address::new(reader.read_u32(at)? as u64),
            _ => reader.read_ptr(at)?,
        };
        Ok(table)
    }

    fn read_entry(&self, reader: &dyn MemoryReader, entry: Address) -> Result<i64, ReflectError> {
        let value = match (self.layout, self.pointer_size) {
            (VbaseTableLayout::Msvc, _) | (_, 4) => reader.read_i32(entry)? as i64,
            _ => reader.read_i64(entry)?,
        };
        Ok(value)
    }
}

/// Offset of a virtual base, read from the object's virtual-base table.
///
/// Two classes sharing the same virtual base can place it differently,
/// so the result depends on the complete object's most-derived type.
pub struct VirtualBaseOffset {
    slot: VirtualBaseSlot,
    reader: Arc<dyn MemoryReader>,
}

impl VirtualBaseOffset {
    pub fn new(slot: VirtualBaseSlot, reader: Arc<dyn MemoryReader>) -> Self {
        Self { slot, reader }
    }

    pub fn shared(slot: VirtualBaseSlot, reader: Arc<dyn MemoryReader>) -> Arc<dyn OffsetResolver> {
        Arc::new(Self::new(slot, reader))
    }

    pub fn slot(&self) -> &VirtualBaseSlot {
        &self.slot
    }
}

impl OffsetResolver for VirtualBaseOffset {
    fn compute(&self, object: Option<Address>) -> Result<Offset, ReflectError> {
        let object = object.ok_or(ReflectError::MissingObjectAddress)?;
        let reader = self.reader.as_ref();

        let table = self.slot.read_table_pointer(reader, object)?;
        let entry = self.slot.entry_address(table);
        let value = self.slot.read_entry(reader, entry)?;
        let offset = Offset::new(self.slot.vptr_offset as i64 + value);

        trace!(
            "Virtual base slot {} of object {} (table {}) -> {}",
            self.slot.index, object, table, offset
        );
        Ok(offset)
    }

    fn is_dynamic(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!(
            "virtual {:?} slot {} (vptr +0x{:x})",
            self.slot.layout, self.slot.index, self.slot.vptr_offset
        )
    }
}

impl fmt::Debug for VirtualBaseOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualBaseOffset")
            .field("slot", &self.slot)
            .finish()
    }
}
