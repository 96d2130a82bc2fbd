// Sat Oct 17 2026 - Alex

use crate::config::Config;
use crate::structure::{Base, ClassDescription, ReflectError};
use crate::types::{NameFlags, TypeHandle, TypeIdentity};
use ahash::RandomState;
use indexmap::IndexMap;
use log::{debug, warn};
use parking_lot::RwLock;
use std::sync::Arc;

type ClassMap = IndexMap<TypeIdentity, Arc<ClassDescription>, RandomState>;

/// Owns every registered class description and its base edges.
///
/// Edges are only created through `register`, after which they are
/// shared read-only.
pub struct ClassRegistry {
    classes: RwLock<ClassMap>,
    config: Config,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self {
            classes: RwLock::new(IndexMap::with_hasher(RandomState::new())),
            config: Config::default(),
        }
    }

    pub fn with_config(config: Config) -> Result<Self, ReflectError> {
        config.validate().map_err(ReflectError::Config)?;
        Ok(Self {
            classes: RwLock::new(IndexMap::with_hasher(RandomState::new())),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn caches_back_refs(&self) -> bool {
        self.config.cache_back_refs
    }

    /// Registers `handle` as a class with the given direct bases.
    ///
    /// Bases may name types that are only forward declared so far.
    pub fn register(&self, handle: &TypeHandle, bases: Vec<Base>) -> Result<Arc<ClassDescription>, ReflectError> {
        let name = handle.name(NameFlags::SCOPED);
        let identity = match handle.identity() {
            Some(id) if handle.is_class() => id,
            _ => return Err(ReflectError::NotAClass(name)),
        };

        for base in &bases {
            if !base.modifiers().has_single_access() {
                if self.config.strict_access {
                    return Err(ReflectError::InvalidModifiers {
                        base: base.resolved_type_name(false),
                        bits: base.modifiers().bits(),
                    });
                }
                warn!(
                    "Base {} of {} has access bits {:#x}",
                    base.resolved_type_name(false),
                    name,
                    base.modifiers().bits()
                );
            }
            if !base.is_resolved() {
                debug!("Base {} of {} is not resolved yet", base.resolved_type_name(false), name);
            }
        }

        let mut classes = self.classes.write();
        if classes.contains_key(&identity) {
            return Err(ReflectError::ClassAlreadyRegistered(name));
        }
        let class = Arc::new(ClassDescription::new(handle.clone(), bases));
        classes.insert(identity, class.clone());
        debug!("Registered {}", class);
        Ok(class)
    }

    /// Class description for a type, following typedefs. None while the
    /// type is unresolved or not a registered class.
    pub fn class_of(&self, handle: &TypeHandle) -> Option<Arc<ClassDescription>> {
        let identity = handle.final_type().identity()?;
        self.classes.read().get(&identity).cloned()
    }

    pub fn class_by_name(&self, name: &str) -> Option<Arc<ClassDescription>> {
        self.classes
            .read()
            .values()
            .find(|c| c.type_handle().declared_name() == name)
            .cloned()
    }

    /// Class description of the type an edge points at.
    pub fn base_class(&self, base: &Base) -> Option<Arc<ClassDescription>> {
        base.base_class(self)
    }

    /// All classes, in registration order.
    pub fn classes(&self) -> Vec<Arc<ClassDescription>> {
        self.classes.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Address, BufferMemory, LocalMemory, MemoryReader};
    use crate::structure::{
        AccessSpecifier, ClassBuilder, ConstantOffset, Modifiers, Offset, VbaseTableLayout, VirtualBaseOffset,
        VirtualBaseSlot,
    };
    use crate::types::TypeRegistry;

    const MEM: u64 = 0x20000;

    fn image() -> Arc<BufferMemory> {
        Arc::new(BufferMemory::new(Address::new(MEM), 0x1000))
    }

    fn at(offset: u64) -> Address {
        Address::new(MEM + offset)
    }

    #[test]
    fn test_register_and_lookup() {
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        let a = ClassBuilder::new(&types, "ns::A", 8).register(&classes).unwrap();
        let b = ClassBuilder::new(&types, "ns::B", 16)
            .base("ns::A", 0, AccessSpecifier::Public)
            .register(&classes)
            .unwrap();

        assert_eq!(classes.len(), 2);
        assert!(Arc::ptr_eq(&classes.class_by_name("ns::B").unwrap(), &b));
        assert!(Arc::ptr_eq(&classes.class_of(a.type_handle()).unwrap(), &a));
        assert_eq!(b.base_count(), 1);
        assert_eq!(b.to_string(), "class ns::B : public ns::A // sizeof = 0x10");
        assert!(classes.class_by_name("ns::C").is_none());
    }

    #[test]
    fn test_register_rejects_duplicates_and_non_classes() {
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        let a = types.define_class("A", 8).unwrap();
        classes.register(&a, Vec::new()).unwrap();
        assert!(matches!(
            classes.register(&a, Vec::new()),
            Err(ReflectError::ClassAlreadyRegistered(_))
        ));

        let int = types.define_fundamental("int", 4).unwrap();
        assert!(matches!(classes.register(&int, Vec::new()), Err(ReflectError::NotAClass(_))));
        assert!(matches!(
            classes.register(&types.declare("Later"), Vec::new()),
            Err(ReflectError::NotAClass(_))
        ));
        assert!(matches!(
            classes.register(&TypeHandle::null(), Vec::new()),
            Err(ReflectError::NotAClass(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = ClassRegistry::with_config(Config::new().with_pointer_size(6));
        assert!(matches!(result, Err(ReflectError::Config(_))));
        assert!(ClassRegistry::with_config(Config::new().with_pointer_size(4)).is_ok());
    }

    #[test]
    fn test_strict_access() {
        let types = TypeRegistry::new();
        let a = types.define_class("A", 8).unwrap();
        let d = types.define_class("D", 8).unwrap();
        let both = Base::new(a.clone(), ConstantOffset::shared(0i64), Modifiers::PUBLIC | Modifiers::PRIVATE);

        let strict = ClassRegistry::with_config(Config::new().with_strict_access(true)).unwrap();
        assert!(matches!(
            strict.register(&d, vec![both.clone()]),
            Err(ReflectError::InvalidModifiers { bits: 0b101, .. })
        ));
        let none = Base::new(a, ConstantOffset::shared(0i64), Modifiers::VIRTUAL);
        assert!(strict.register(&d, vec![none]).is_err());

        let lenient = ClassRegistry::new();
        let class = lenient.register(&d, vec![both]).unwrap();
        assert!(class.bases()[0].is_public());
        assert!(class.bases()[0].is_private());
        assert_eq!(class.bases()[0].access(), None);
    }

    #[test]
    fn test_lazy_back_reference() {
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        let derived = ClassBuilder::new(&types, "Derived", 16)
            .base("Late", 0, AccessSpecifier::Public)
            .register(&classes)
            .unwrap();
        let edge = &derived.bases()[0];

        assert!(!edge.is_resolved());
        assert!(classes.base_class(edge).is_none());
        assert!(!edge.has_cached_class());

        // defined but not yet registered as a class
        types.define_class("Late", 8).unwrap();
        assert!(edge.is_resolved());
        assert!(classes.base_class(edge).is_none());
        assert!(!edge.has_cached_class());

        let late = ClassBuilder::new(&types, "Late", 8).register(&classes).unwrap();
        let first = classes.base_class(edge).unwrap();
        assert!(Arc::ptr_eq(&first, &late));
        assert!(edge.has_cached_class());
        for _ in 0..3 {
            assert!(Arc::ptr_eq(&classes.base_class(edge).unwrap(), &late));
        }
    }

    #[test]
    fn test_concurrent_first_lookup() {
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        let base = ClassBuilder::new(&types, "B", 8).register(&classes).unwrap();
        let derived = ClassBuilder::new(&types, "D", 16)
            .base("B", 0, AccessSpecifier::Public)
            .register(&classes)
            .unwrap();
        let edge = &derived.bases()[0];

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..100 {
                        let found = classes.base_class(edge).unwrap();
                        assert!(Arc::ptr_eq(&found, &base));
                    }
                });
            }
        });
        assert!(edge.has_cached_class());
    }

    #[test]
    fn test_back_reference_without_cache() {
        let types = TypeRegistry::new();
        let classes = ClassRegistry::with_config(Config::new().with_cache_back_refs(false)).unwrap();
        let base = ClassBuilder::new(&types, "B", 8).register(&classes).unwrap();
        let derived = ClassBuilder::new(&types, "D", 8)
            .base("B", 0, AccessSpecifier::Private)
            .register(&classes)
            .unwrap();
        let edge = &derived.bases()[0];

        assert!(Arc::ptr_eq(&classes.base_class(edge).unwrap(), &base));
        assert!(Arc::ptr_eq(&classes.base_class(edge).unwrap(), &base));
        assert!(!edge.has_cached_class());
    }

    #[test]
    fn test_back_reference_through_typedef() {
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        let target = ClassBuilder::new(&types, "Impl", 8).register(&classes).unwrap();
        let alias = types.define_typedef("Alias", target.type_handle()).unwrap();
        let derived = classes
            .register(
                &types.define_class("D", 8).unwrap(),
                vec![Base::new(alias, ConstantOffset::shared(0i64), Modifiers::PUBLIC)],
            )
            .unwrap();

        assert!(Arc::ptr_eq(&classes.base_class(&derived.bases()[0]).unwrap(), &target));
    }

    #[test]
    fn test_resolved_non_class_target() {
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        let int = types.define_fundamental("int", 4).unwrap();
        let edge = Base::new(int, ConstantOffset::shared(0i64), Modifiers::PUBLIC);

        assert!(edge.is_resolved());
        assert!(classes.base_class(&edge).is_none());
        assert!(!edge.has_cached_class());
        assert_eq!(edge.offset(None).unwrap(), Offset::zero());
    }

    #[test]
    fn test_virtual_offset_depends_on_object() {
        let mem = image();
        let classes = ClassRegistry::with_config(Config::new().with_vbase_layout(VbaseTableLayout::Direct)).unwrap();
        let types = TypeRegistry::new();
        let reader: Arc<dyn MemoryReader> = mem.clone();

        ClassBuilder::new(&types, "V", 8).register(&classes).unwrap();
        let left = ClassBuilder::new(&types, "Left", 32)
            .with_reader(reader.clone())
            .virtual_base("V", 0, AccessSpecifier::Public)
            .register(&classes)
            .unwrap();
        let right = ClassBuilder::new(&types, "Right", 48)
            .with_reader(reader)
            .virtual_base("V", 0, AccessSpecifier::Public)
            .register(&classes)
            .unwrap();

        // Left object @ 0x100 -> table @ 0x800 [24]; Right object @ 0x200 -> table @ 0x810 [40]
        mem.write_ptr(at(0x100), at(0x800)).unwrap();
        mem.write_i64(at(0x800), 24).unwrap();
        mem.write_ptr(at(0x200), at(0x810)).unwrap();
        mem.write_i64(at(0x810), 40).unwrap();

        let left_edge = &left.bases()[0];
        let right_edge = &right.bases()[0];
        assert!(left_edge.is_virtual() && left_edge.is_public());
        assert!(left_edge.resolver().unwrap().is_dynamic());
        assert_eq!(left_edge.offset(Some(at(0x100))).unwrap(), Offset::new(24));
        assert_eq!(right_edge.offset(Some(at(0x200))).unwrap(), Offset::new(40));
        assert_eq!(left_edge.base_address(at(0x100)).unwrap(), at(0x118));
        assert!(matches!(left_edge.offset(None), Err(ReflectError::MissingObjectAddress)));
    }

    #[test]
    fn test_virtual_base_needs_reader() {
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        let result = ClassBuilder::new(&types, "D", 16)
            .base("A", 0, AccessSpecifier::Public)
            .virtual_base("V", 0, AccessSpecifier::Public)
            .register(&classes);
        assert!(matches!(result, Err(ReflectError::Config(_))));
        assert!(classes.is_empty());
        assert!(types.is_empty());
        assert!(types.unresolved().is_empty());
    }

    /// struct V; struct L : virtual V; struct R : virtual V; struct D : L, R;
    ///
    /// D @ 0x100: [0x00] vptr(L-in-D) [0x10] vptr(R-in-D) [0x20] V
    /// L @ 0x300: [0x00] vptr(L)      [0x10] V
    fn diamond(mem: &Arc<BufferMemory>, types: &TypeRegistry, classes: &ClassRegistry) {
        let reader: Arc<dyn MemoryReader> = mem.clone();
        ClassBuilder::new(types, "V", 8).register(classes).unwrap();
        ClassBuilder::new(types, "L", 24)
            .with_reader(reader.clone())
            .virtual_base("V", 0, AccessSpecifier::Public)
            .register(classes)
            .unwrap();
        ClassBuilder::new(types, "R", 24)
            .with_reader(reader)
            .virtual_base("V", 0, AccessSpecifier::Public)
            .register(classes)
            .unwrap();
        ClassBuilder::new(types, "D", 40)
            .base("L", 0, AccessSpecifier::Public)
            .base("R", 0x10, AccessSpecifier::Public)
            .register(classes)
            .unwrap();

        // address points, with the vbase offset 0x18 below each
        mem.write_ptr(at(0x100), at(0x840)).unwrap();
        mem.write_i64(at(0x840 - 0x18), 0x20).unwrap();
        mem.write_ptr(at(0x110), at(0x880)).unwrap();
        mem.write_i64(at(0x880 - 0x18), 0x10).unwrap();
        mem.write_ptr(at(0x300), at(0x8c0)).unwrap();
        mem.write_i64(at(0x8c0 - 0x18), 0x10).unwrap();
    }

    #[test]
    fn test_diamond_upcast() {
        let mem = image();
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        diamond(&mem, &types, &classes);

        let d = classes.class_by_name("D").unwrap();
        let l = classes.class_by_name("L").unwrap();
        let r = classes.class_by_name("R").unwrap();
        let v = types.by_name("V").unwrap();

        assert!(d.has_base(&v, &classes));
        assert!(!l.has_base(d.type_handle(), &classes));
        assert!(l.has_virtual_bases());
        assert!(!d.has_virtual_bases());

        let path = d.base_path(&v, &classes).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].resolved_type_name(false), "L");
        assert!(path[1].is_virtual());

        assert_eq!(d.upcast_offset(&v, at(0x100), &classes).unwrap(), Offset::new(0x20));
        assert_eq!(d.upcast(&v, at(0x100), &classes).unwrap(), at(0x120));
        assert_eq!(r.upcast(&v, at(0x110), &classes).unwrap(), at(0x120));
        assert_eq!(d.upcast(r.type_handle(), at(0x100), &classes).unwrap(), at(0x110));

        // same edge, different most-derived type
        assert_eq!(l.upcast_offset(&v, at(0x300), &classes).unwrap(), Offset::new(0x10));
        assert_eq!(l.upcast_offset(&v, at(0x100), &classes).unwrap(), Offset::new(0x20));
    }

    #[test]
    fn test_upcast_to_unrelated_class() {
        let mem = image();
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        diamond(&mem, &types, &classes);
        let other = types.define_class("Other", 8).unwrap();
        let d = classes.class_by_name("D").unwrap();

        assert!(matches!(
            d.upcast_offset(&other, at(0x100), &classes),
            Err(ReflectError::BaseNotFound { .. })
        ));
    }

    #[test]
    fn test_diamond_ladder_visits_each_class_once() {
        // Lk : Ak, Bk; Ak : L(k+1); Bk : L(k+1)
        const LEVELS: usize = 30;
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        ClassBuilder::new(&types, &format!("L{}", LEVELS), 8).register(&classes).unwrap();
        for k in (0..LEVELS).rev() {
            let next = format!("L{}", k + 1);
            for side in ["A", "B"] {
                ClassBuilder::new(&types, &format!("{}{}", side, k), 8)
                    .base(&next, 0, AccessSpecifier::Public)
                    .register(&classes)
                    .unwrap();
            }
            ClassBuilder::new(&types, &format!("L{}", k), 16)
                .base(&format!("A{}", k), 0, AccessSpecifier::Public)
                .base(&format!("B{}", k), 8, AccessSpecifier::Public)
                .register(&classes)
                .unwrap();
        }
        assert_eq!(classes.len(), 3 * LEVELS + 1);

        let root = classes.class_by_name("L0").unwrap();
        let unrelated = types.define_class("Unrelated", 8).unwrap();
        let bottom = types.by_name(&format!("L{}", LEVELS)).unwrap();

        assert!(!root.has_base(&unrelated, &classes));
        assert!(root.has_base(&bottom, &classes));
        assert_eq!(root.base_path(&bottom, &classes).unwrap().len(), 2 * LEVELS);
        assert_eq!(root.upcast_offset(&bottom, Address::new(0x1000), &classes).unwrap(), Offset::zero());
    }

    #[test]
    fn test_self_edge_terminates() {
        let types = TypeRegistry::new();
        let classes = ClassRegistry::new();
        let handle = types.define_class("Loop", 8).unwrap();
        let edges = vec![
            Base::new(handle.clone(), ConstantOffset::shared(0i64), Modifiers::PUBLIC),
            Base::new(handle.clone(), ConstantOffset::shared(8i64), Modifiers::PUBLIC),
        ];
        let class = classes.register(&handle, edges).unwrap();
        let unrelated = types.define_class("Unrelated", 8).unwrap();

        assert!(!class.has_base(&unrelated, &classes));
    }

    #[allow(dead_code)]
    #[repr(C)]
    struct VbaseTable {
        offsets: [i64; 2],
    }

    #[allow(dead_code)]
    #[repr(C)]
    struct Object {
        table: *const VbaseTable,
        payload: [u64; 5],
    }

    #[test]
    fn test_live_object_in_process() {
        let table = VbaseTable { offsets: [16, 32] };
        let object = Object { table: &table, payload: [0; 5] };

        let slot = VirtualBaseSlot::new(VbaseTableLayout::Direct, 1);
        // SAFETY: the resolver only reads `object` and `table`, both alive
        // for the rest of the test.
        let reader = unsafe { LocalMemory::new() };
        let resolver = VirtualBaseOffset::shared(slot, Arc::new(reader));
        let types = TypeRegistry::new();
        let edge = Base::new(types.define_class("V", 8).unwrap(), resolver, Modifiers::PUBLIC | Modifiers::VIRTUAL);

        let addr = Address::from_ref(&object);
        assert_eq!(edge.offset(Some(addr)).unwrap(), Offset::new(32));
        assert_eq!(
            edge.base_address(addr).unwrap(),
            Address::from_ref(&object.payload[3])
        );
    }
}
