// Sat Oct 17 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryReader};

/// Reads the memory of the current process.
///
/// Only null is rejected; every other address is dereferenced as is.
#[derive(Debug, Clone, Copy)]
pub struct LocalMemory {
    _private: (),
}

impl LocalMemory {
    /// # Safety
    ///
    /// Every address read through this reader (and its copies) must be
    /// live and readable for the requested length.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl MemoryReader for LocalMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        if addr.is_null() {
            return Err(MemoryError::NullAddress);
        }
        let mut out = vec![0u8; len];
        // SAFETY: guaranteed by the contract of `LocalMemory::new`.
        unsafe {
            std::ptr::copy_nonoverlapping(addr.as_ptr(), out.as_mut_ptr(), len);
        }
        Ok(out)
    }

    fn read_u64(&self, addr: Address) -> Result<u64, MemoryError> {
        if addr.is_null() {
            return Err(MemoryError::NullAddress);
        }
        // SAFETY: see read_bytes.
        Ok(unsafe { std::ptr::read_unaligned(addr.as_ptr() as *const u64) })
    }

    fn read_u32(&self, addr: Address) -> Result<u32, MemoryError> {
        if addr.is_null() {
            return Err(MemoryError::NullAddress);
        }
        // SAFETY: see read_bytes.
        Ok(unsafe { std::ptr::read_unaligned(addr.as_ptr() as *const u32) })
    }
}
