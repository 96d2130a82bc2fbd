// Sat Oct 17 2026 - Alex

use crate::memory::MemoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("Base type not resolved: {0}")]
    UnresolvedBase(String),
    #[error("Virtual base offset needs a complete object address")]
    MissingObjectAddress,
    #[error("Base has no offset resolver")]
    NoResolver,
    #[error("Type already defined: {0}")]
    TypeAlreadyDefined(String),
    #[error("Typedef refers back to itself: {0}")]
    TypedefCycle(String),
    #[error("Class already registered: {0}")]
    ClassAlreadyRegistered(String),
    #[error("Not a class type: {0}")]
    NotAClass(String),
    #[error("{base} is not a base of {derived}")]
    BaseNotFound { derived: String, base: String },
    #[error("Invalid modifiers on base {base}: {bits:#x}")]
    InvalidModifiers { base: String, bits: u32 },
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),
    #[error("Config error: {0}")]
    Config(String),
}
