// Sat Oct 17 2026 - Alex

use crate::memory::{Address, MemoryError};

/// Read access to the memory that holds live objects.
///
/// Only `read_bytes` is required; the typed reads are little-endian
/// decodings of it. Readers that can do better (like `LocalMemory`)
/// override them.
pub trait MemoryReader: Send + Sync {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError>;

    fn read_u32(&self, addr: Address) -> Result<u32, MemoryError> {
        let bytes = self.read_bytes(addr, 4)?;
        let bytes: [u8; 4] = bytes.as_slice().try_into().map_err(|_| MemoryError::InvalidRange)?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn read_u64(&self, addr: Address) -> Result<u64, MemoryError> {
        let bytes = self.read_bytes(addr, 8)?;
        let bytes: [u8; 8] = bytes.as_slice().try_into().map_err(|_| MemoryError::InvalidRange)?;
        Ok(u64::from_le_bytes(bytes))
    }

    fn read_i32(&self, addr: Address) -> Result<i32, MemoryError> {
        Ok(self.read_u32(addr)? as i32)
    }

    fn read_i64(&self, addr: Address) -> Result<i64, MemoryError> {
        Ok(self.read_u64(addr)? as i64)
    }

    fn read_ptr(&self, addr: Address) -> Result<Address, MemoryError> {
        Ok(Address::new(self.read_u64(addr)?))
    }
}
