// Sat Oct 17 2026 - Alex

use crate::structure::{ReflectError, VbaseTableLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pointer width of the described objects, 4 or 8.
    pub pointer_size: usize,
    /// Virtual-base table layout used by `ClassBuilder` for virtual bases.
    pub vbase_layout: VbaseTableLayout,
    /// Cache the base-class back-reference on each edge. When off, every
    /// lookup goes to the registry.
    pub cache_back_refs: bool,
    /// Reject edges that do not carry exactly one access bit.
    pub strict_access: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pointer_size: 8,
            vbase_layout: VbaseTableLayout::Itanium,
            cache_back_refs: true,
            strict_access: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pointer_size(mut self, pointer_size: usize) -> Self {
        self.pointer_size = pointer_size;
        self
    }

    pub fn with_vbase_layout(mut self, layout: VbaseTableLayout) -> Self {
        self.vbase_layout = layout;
        self
    }

    pub fn with_cache_back_refs(mut self, cache: bool) -> Self {
        self.cache_back_refs = cache;
        self
    }

    pub fn with_strict_access(mut self, strict: bool) -> Self {
        self.strict_access = strict;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.pointer_size != 4 && self.pointer_size != 8 {
            return Err(format!("pointer_size must be 4 or 8, got {}", self.pointer_size));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ReflectError> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| ReflectError::Config(e.to_string()))?;
        config.validate().map_err(ReflectError::Config)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReflectError> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ReflectError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ReflectError> {
        serde_json::to_string_pretty(self).map_err(|e| ReflectError::Config(e.to_string()))
    }
}
