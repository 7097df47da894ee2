//! Shared builders for hierarchy tests.
#![allow(dead_code)]

use semlink::symbols::{
    ClassDecl, ClassId, FunctionDecl, FunctionId, Modality, SupertypeRef, SymbolTable, Ty,
    Visibility,
};

/// Fresh table with a `Unit` class to use as a return type.
pub fn new_table() -> (SymbolTable, Ty) {
    let mut table = SymbolTable::new();
    let mut unit = ClassDecl::new("lang", "Unit");
    unit.supertypes_resolved = true;
    let unit = Ty::class(table.add_class(unit));
    (table, unit)
}

/// Public class with no supertypes, supertype resolution done.
pub fn class(table: &mut SymbolTable, name: &str) -> ClassId {
    let mut decl = ClassDecl::new("demo", name);
    decl.supertypes_resolved = true;
    table.add_class(decl)
}

/// Public class extending the given supertypes without type arguments.
pub fn class_extending(table: &mut SymbolTable, name: &str, supertypes: &[ClassId]) -> ClassId {
    let id = class(table, name);
    table.set_supertypes(
        id,
        supertypes.iter().map(|&super_class| SupertypeRef::new(super_class)).collect(),
    );
    id
}

/// Public open method with no parameters.
pub fn method(table: &mut SymbolTable, owner: ClassId, name: &str, return_type: Ty) -> FunctionId {
    method_with(
        table,
        owner,
        name,
        return_type,
        Visibility::Public,
        Modality::Open,
    )
}

pub fn method_with(
    table: &mut SymbolTable,
    owner: ClassId,
    name: &str,
    return_type: Ty,
    visibility: Visibility,
    modality: Modality,
) -> FunctionId {
    let mut decl = FunctionDecl::new("demo", name, return_type);
    decl.owner = Some(owner);
    decl.visibility = visibility;
    decl.modality = modality;
    table.add_function(decl)
}
