// Sat Oct 17 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryReader};
use parking_lot::RwLock;

/// A little-endian memory image mapped at a fixed base address.
///
/// Used to lay out object images (vtable pointers, virtual-base tables)
/// without touching real process memory.
pub struct BufferMemory {
    data: RwLock<Vec<u8>>,
    base_address: Address,
}

impl BufferMemory {
    pub fn new(base_address: Address, size: usize) -> Self {
        Self {
            data: RwLock::new(vec![0u8; size]),
            base_address,
        }
    }

    pub fn base_address(&self) -> Address {
        self.base_address
    }

    pub fn size(&self) -> usize {
        self.data.read().len()
    }

    fn range(&self, addr: Address, len: usize) -> Result<std::ops::Range<usize>, MemoryError> {
        if addr.as_u64() < self.base_address.as_u64() {
            return Err(MemoryError::OutOfBounds(addr.as_u64()));
        }
        let start = (addr.as_u64() - self.base_address.as_u64()) as usize;
        let end = start.checked_add(len).ok_or(MemoryError::InvalidRange)?;
        if end > self.size() {
            return Err(MemoryError::OutOfBounds(addr.as_u64()));
        }
        Ok(start..end)
    }

    pub fn write_bytes(&self, addr: Address, bytes: &[u8]) -> Result<(), MemoryError> {
        let range = self.range(addr, bytes.len())?;
        self.data.write()[range].copy_from_slice(bytes);
        Ok(())
    }

    pub fn write_i32(&self, addr: Address, value: i32) -> Result<(), MemoryError> {
        self.write_bytes(addr, &value.to_le_bytes())
    }

    pub fn write_i64(&self, addr: Address, value: i64) -> Result<(), MemoryError> {
        self.write_bytes(addr, &value.to_le_bytes())
    }

    pub fn write_ptr(&self, addr: Address, value: Address) -> Result<(), MemoryError> {
        self.write_bytes(addr, &value.as_u64().to_le_bytes())
    }
}

impl MemoryReader for BufferMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        let range = self.range(addr, len)?;
        Ok(self.data.read()[range].to_vec())
    }
}
