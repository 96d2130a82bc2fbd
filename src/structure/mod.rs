// Sat Oct 17 2026 - Alex

pub mod base;
pub mod builder;
pub mod class;
pub mod error;
pub mod modifiers;
pub mod offset;
pub mod registry;
pub mod resolver;

pub use base::Base;
pub use builder::ClassBuilder;
pub use class::ClassDescription;
pub use error::ReflectError;
pub use modifiers::{AccessSpecifier, Modifiers};
pub use offset::Offset;
pub use registry::ClassRegistry;
pub use resolver::{ConstantOffset, OffsetResolver, VbaseTableLayout, VirtualBaseOffset, VirtualBaseSlot};
