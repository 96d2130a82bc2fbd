// Sat Oct 17 2026 - Alex

//! Inheritance edges between reflected C++ classes and the offset
//! resolvers that turn a derived-object address into the address of a
//! base subobject, including virtual bases whose position depends on
//! the most-derived type.

pub mod config;
pub mod memory;
pub mod structure;
pub mod types;
pub mod utils;

pub use config::Config;
pub use memory::{Address, BufferMemory, LocalMemory, MemoryError, MemoryReader};
pub use structure::{
    AccessSpecifier, Base, ClassBuilder, ClassDescription, ClassRegistry, ConstantOffset, Modifiers, Offset,
    OffsetResolver, ReflectError, VbaseTableLayout, VirtualBaseOffset, VirtualBaseSlot,
};
pub use types::{NameFlags, ScopeHandle, TypeHandle, TypeRegistry};
