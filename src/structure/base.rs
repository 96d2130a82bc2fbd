// Sat Oct 17 2026 - Alex

use crate::memory::Address;
use crate::structure::{
    AccessSpecifier, ClassDescription, ClassRegistry, Modifiers, Offset, OffsetResolver, ReflectError,
};
use crate::types::{NameFlags, ScopeHandle, TypeHandle};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::{Arc, Weak};

/// One inheritance edge from a class to one of its direct bases.
///
/// The target type may still be a forward declaration when the edge is
/// built; it resolves in place later. Target, resolver and modifiers
/// never change after construction. The only mutable state is the
/// cached back-reference to the base's class description.
#[derive(Clone, Default)]
pub struct Base {
    target: TypeHandle,
    resolver: Option<Arc<dyn OffsetResolver>>,
    modifiers: Modifiers,
    owner: OnceCell<Weak<ClassDescription>>,
}

impl Base {
    pub fn new(target: TypeHandle, resolver: Arc<dyn OffsetResolver>, modifiers: Modifiers) -> Self {
        Self {
            target,
            resolver: Some(resolver),
            modifiers,
            owner: OnceCell::new(),
        }
    }

    /// True once the base type is defined.
    pub fn is_resolved(&self) -> bool {
        self.target.is_resolved()
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.contains(Modifiers::PUBLIC)
    }

    pub fn is_protected(&self) -> bool {
        self.modifiers.contains(Modifiers::PROTECTED)
    }

    pub fn is_private(&self) -> bool {
        self.modifiers.contains(Modifiers::PRIVATE)
    }

    pub fn is_virtual(&self) -> bool {
        self.modifiers.contains(Modifiers::VIRTUAL)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// None when the edge carries zero or several access bits.
    pub fn access(&self) -> Option<AccessSpecifier> {
        self.modifiers.access()
    }

    pub fn name(&self, flags: NameFlags) -> String {
        self.target.name(flags)
    }

    /// Scoped name of the base type, optionally with typedefs expanded.
    /// Empty for the default edge; a forward declaration reports the
    /// declared name.
    pub fn resolved_type_name(&self, expand_typedefs: bool) -> String {
        let mut flags = NameFlags::SCOPED;
        if expand_typedefs {
            flags |= NameFlags::FINAL;
        }
        self.target.name(flags)
    }

    /// Displacement from `object` to the base subobject.
    ///
    /// Always delegates to the resolver. Constant resolvers ignore
    /// `object`; virtual bases need the address of a live object whose
    /// class declares this edge.
    pub fn offset(&self, object: Option<Address>) -> Result<Offset, ReflectError> {
        if !self.is_resolved() {
            return Err(ReflectError::UnresolvedBase(self.resolved_type_name(false)));
        }
        let resolver = self.resolver.as_ref().ok_or(ReflectError::NoResolver)?;
        resolver.compute(object)
    }

    /// `object + offset(object)`
    pub fn base_address(&self, object: Address) -> Result<Address, ReflectError> {
        Ok(object.adjust(self.offset(Some(object))?))
    }

    pub fn resolver(&self) -> Option<&Arc<dyn OffsetResolver>> {
        self.resolver.as_ref()
    }

    /// The base type; with `finalize`, the type behind any typedefs.
    pub fn as_type(&self, finalize: bool) -> TypeHandle {
        if finalize {
            self.target.final_type()
        } else {
            self.target.clone()
        }
    }

    pub fn as_scope(&self) -> ScopeHandle {
        self.target.as_scope()
    }

    /// Class description of the base type.
    ///
    /// An edge belongs to the registry that registered its class; the
    /// cache does not tell registries apart. The first successful lookup
    /// is cached as a weak reference. While the target is unresolved, or
    /// resolves to something that is not a registered class, this
    /// returns None and nothing is cached.
    pub(crate) fn base_class(&self, registry: &ClassRegistry) -> Option<Arc<ClassDescription>> {
        let lookup = || {
            let target = self.target.final_type();
            if !target.is_resolved() {
                return None;
            }
            registry.class_of(&target)
        };

        if !registry.caches_back_refs() {
            return lookup();
        }
        self.owner
            .get_or_try_init(|| lookup().map(|class| Arc::downgrade(&class)).ok_or(()))
            .ok()?
            .upgrade()
    }

    #[cfg(test)]
    pub(crate) fn has_cached_class(&self) -> bool {
        self.owner.get().is_some()
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Base")
            .field("target", &self.target)
            .field("modifiers", &self.modifiers)
            .field("resolver", &self.resolver)
            .finish()
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_virtual() {
            write!(f, "virtual ")?;
        }
        if let Some(access) = self.access() {
            write!(f, "{} ", access)?;
        }
        write!(f, "{}", self.resolved_type_name(false))
    }
}
