// Sat Oct 17 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Null address")]
    NullAddress,
    #[error("Out of bounds: address {0:#x} not in image")]
    OutOfBounds(u64),
    #[error("Invalid memory range")]
    InvalidRange,
}
