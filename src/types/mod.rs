// Sat Oct 17 2026 - Alex

pub mod handle;
pub mod name;
pub mod registry;
pub mod scope;

pub use handle::{TypeHandle, TypeIdentity, TypeKind};
pub use name::NameFlags;
pub use registry::TypeRegistry;
pub use scope::ScopeHandle;
