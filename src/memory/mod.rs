// Sat Oct 17 2026 - Alex

pub mod address;
pub mod buffer;
pub mod error;
pub mod local;
pub mod traits;

pub use address::Address;
pub use buffer::BufferMemory;
pub use error::MemoryError;
pub use local::LocalMemory;
pub use traits::MemoryReader;
