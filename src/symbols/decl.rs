//! Declaration records and their arena ids.

use crate::base::Name;

use super::types::Ty;

/// Unique identifier for a class-like declaration in the arena.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Unique identifier for a function declaration in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub u32);

impl FunctionId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Unique identifier for a property declaration in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub u32);

impl PropertyId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Unique identifier for a constructor declaration in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstructorId(pub u32);

impl ConstructorId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declared visibility of a member or classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
    /// Declared inside a body; has no stable cross-module identity.
    Local,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }

    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }
}

/// Declared modality of a member or classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Final,
    Open,
    Abstract,
}

/// The kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    EnumClass,
    EnumEntry,
}

/// A resolved reference to a supertype, with the type arguments applied
/// at the use site (`Base<Int>` carries `arguments = [Int]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupertypeRef {
    pub class: ClassId,
    pub arguments: Vec<Ty>,
}

impl SupertypeRef {
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(class: ClassId, arguments: Vec<Ty>) -> Self {
        Self { class, arguments }
    }
}

/// A class-like declaration: class, interface, enum class, or enum entry.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: Name,
    /// Package of the enclosing top-level declaration.
    pub package: Name,
    /// Enclosing class for nested classifiers.
    pub owner: Option<ClassId>,
    pub kind: ClassKind,
    pub visibility: Visibility,
    pub modality: Modality,
    pub is_expect: bool,
    pub type_params: Vec<Name>,
    pub supertypes: Vec<SupertypeRef>,
    /// Set once supertype resolution has run for this class. Override
    /// queries issued before that see an empty supertype view.
    pub supertypes_resolved: bool,
    pub functions: Vec<FunctionId>,
    pub properties: Vec<PropertyId>,
    pub constructors: Vec<ConstructorId>,
    pub nested_classes: Vec<ClassId>,
}

impl ClassDecl {
    pub fn new(package: impl Into<Name>, name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            owner: None,
            kind: ClassKind::Class,
            visibility: Visibility::Public,
            modality: Modality::Open,
            is_expect: false,
            type_params: Vec::new(),
            supertypes: Vec::new(),
            supertypes_resolved: false,
            functions: Vec::new(),
            properties: Vec::new(),
            constructors: Vec::new(),
            nested_classes: Vec::new(),
        }
    }
}

/// A function declaration.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Name,
    pub package: Name,
    /// Owning class for members; `None` for top-level functions.
    pub owner: Option<ClassId>,
    pub visibility: Visibility,
    pub modality: Modality,
    pub is_expect: bool,
    pub receiver: Option<Ty>,
    pub value_params: Vec<Ty>,
    pub return_type: Ty,
}

impl FunctionDecl {
    pub fn new(package: impl Into<Name>, name: impl Into<Name>, return_type: Ty) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            owner: None,
            visibility: Visibility::Public,
            modality: Modality::Open,
            is_expect: false,
            receiver: None,
            value_params: Vec::new(),
            return_type,
        }
    }
}

/// A property declaration.
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    pub name: Name,
    pub package: Name,
    pub owner: Option<ClassId>,
    pub visibility: Visibility,
    pub modality: Modality,
    pub is_expect: bool,
    /// Synthetic override bridging a foreign-interop property.
    pub is_synthetic_override: bool,
    pub ty: Ty,
    pub has_getter: bool,
    pub has_setter: bool,
}

impl PropertyDecl {
    pub fn new(package: impl Into<Name>, name: impl Into<Name>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            owner: None,
            visibility: Visibility::Public,
            modality: Modality::Open,
            is_expect: false,
            is_synthetic_override: false,
            ty,
            has_getter: true,
            has_setter: false,
        }
    }
}

/// A constructor declaration.
#[derive(Debug, Clone)]
pub struct ConstructorDecl {
    pub owner: ClassId,
    pub visibility: Visibility,
    pub value_params: Vec<Ty>,
}

impl ConstructorDecl {
    pub fn new(owner: ClassId) -> Self {
        Self {
            owner,
            visibility: Visibility::Public,
            value_params: Vec::new(),
        }
    }
}
