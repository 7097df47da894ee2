//! The declaration arena.

use rustc_hash::FxHashSet;

use crate::base::Name;

use super::decl::{
    ClassDecl, ClassId, ConstructorDecl, ConstructorId, FunctionDecl, FunctionId, PropertyDecl,
    PropertyId, SupertypeRef,
};

/// Arena storage for all declarations - single source of truth.
///
/// Ids are handed out by the `add_*` methods and stay valid for the
/// lifetime of the table; declarations are never removed. Member
/// declarations are wired into their owner's member lists on insertion,
/// so enumeration order is declaration order.
#[derive(Debug, Default)]
pub struct SymbolTable {
    classes: Vec<ClassDecl>,
    functions: Vec<FunctionDecl>,
    properties: Vec<PropertyDecl>,
    constructors: Vec<ConstructorDecl>,
    /// Declarations in this table originate from a native-interop library.
    pub native_interop_library: bool,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Insertion
    // ============================================================

    pub fn add_class(&mut self, decl: ClassDecl) -> ClassId {
        let id = ClassId::new(self.classes.len());
        let owner = decl.owner;
        self.classes.push(decl);
        if let Some(owner) = owner {
            self.classes[owner.index()].nested_classes.push(id);
        }
        id
    }

    pub fn add_function(&mut self, decl: FunctionDecl) -> FunctionId {
        let id = FunctionId::new(self.functions.len());
        let owner = decl.owner;
        self.functions.push(decl);
        if let Some(owner) = owner {
            self.classes[owner.index()].functions.push(id);
        }
        id
    }

    pub fn add_property(&mut self, decl: PropertyDecl) -> PropertyId {
        let id = PropertyId::new(self.properties.len());
        let owner = decl.owner;
        self.properties.push(decl);
        if let Some(owner) = owner {
            self.classes[owner.index()].properties.push(id);
        }
        id
    }

    pub fn add_constructor(&mut self, decl: ConstructorDecl) -> ConstructorId {
        let id = ConstructorId::new(self.constructors.len());
        let owner = decl.owner;
        self.constructors.push(decl);
        self.classes[owner.index()].constructors.push(id);
        id
    }

    /// Record the resolved supertypes of a class and mark it resolved.
    pub fn set_supertypes(&mut self, class: ClassId, supertypes: Vec<SupertypeRef>) {
        let decl = &mut self.classes[class.index()];
        decl.supertypes = supertypes;
        decl.supertypes_resolved = true;
    }

    // ============================================================
    // Access
    // ============================================================

    pub fn class(&self, id: ClassId) -> &ClassDecl {
        &self.classes[id.index()]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut ClassDecl {
        &mut self.classes[id.index()]
    }

    pub fn function(&self, id: FunctionId) -> &FunctionDecl {
        &self.functions[id.index()]
    }

    pub fn function_mut(&mut self, id: FunctionId) -> &mut FunctionDecl {
        &mut self.functions[id.index()]
    }

    pub fn property(&self, id: PropertyId) -> &PropertyDecl {
        &self.properties[id.index()]
    }

    pub fn property_mut(&mut self, id: PropertyId) -> &mut PropertyDecl {
        &mut self.properties[id.index()]
    }

    pub fn constructor(&self, id: ConstructorId) -> &ConstructorDecl {
        &self.constructors[id.index()]
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    // ============================================================
    // Hierarchy queries
    // ============================================================

    /// Name segments of a class from the outermost container inward.
    pub fn class_path_segments(&self, id: ClassId) -> Vec<&Name> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(class) = current {
            let decl = self.class(class);
            segments.push(&decl.name);
            current = decl.owner;
        }
        segments.reverse();
        segments
    }

    /// Whether `sub` has `sup` among its transitive supertypes.
    ///
    /// Walks the supertype graph with an explicit visited set, so an
    /// (upstream-rejected) cyclic graph terminates instead of recursing.
    pub fn is_subclass_of(&self, sub: ClassId, sup: ClassId) -> bool {
        if sub == sup {
            return true;
        }
        let mut visited = FxHashSet::default();
        let mut work = vec![sub];
        while let Some(class) = work.pop() {
            if !visited.insert(class) {
                continue;
            }
            for super_ref in &self.class(class).supertypes {
                if super_ref.class == sup {
                    return true;
                }
                work.push(super_ref.class);
            }
        }
        false
    }
}
