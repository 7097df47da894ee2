//! Deterministic textual shapes for member declarations.
//!
//! The mangled shape of a member feeds the id hash in its public
//! signature. Both the shape strings and the hash must be stable across
//! processes: the resulting ids end up in persisted signature renders.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::symbols::{ConstructorId, FunctionId, PropertyId, SymbolTable, Ty};

/// Hash a mangled shape into a signature member id.
///
/// `FxHasher` is seed-free, so the same shape hashes identically in
/// every process.
pub fn signature_id(mangled: &str) -> i64 {
    let mut hasher = FxHasher::default();
    mangled.hash(&mut hasher);
    hasher.finish() as i64
}

/// Mangled shape of a function: `recv@name(p1;p2)ret`.
pub fn mangle_function(table: &SymbolTable, function: FunctionId) -> String {
    let decl = table.function(function);
    let mut out = String::with_capacity(64);
    if let Some(receiver) = &decl.receiver {
        mangle_ty(table, receiver, &mut out);
        out.push('@');
    }
    out.push_str(decl.name.as_str());
    out.push('(');
    for (index, param) in decl.value_params.iter().enumerate() {
        if index > 0 {
            out.push(';');
        }
        mangle_ty(table, param, &mut out);
    }
    out.push(')');
    mangle_ty(table, &decl.return_type, &mut out);
    out
}

/// Mangled shape of a property: `name:ty`.
pub fn mangle_property(table: &SymbolTable, property: PropertyId) -> String {
    let decl = table.property(property);
    let mut out = String::with_capacity(32);
    out.push_str(decl.name.as_str());
    out.push(':');
    mangle_ty(table, &decl.ty, &mut out);
    out
}

/// Mangled shape of a constructor: `<init>(p1;p2)`.
pub fn mangle_constructor(table: &SymbolTable, constructor: ConstructorId) -> String {
    let decl = table.constructor(constructor);
    let mut out = String::with_capacity(32);
    out.push_str("<init>(");
    for (index, param) in decl.value_params.iter().enumerate() {
        if index > 0 {
            out.push(';');
        }
        mangle_ty(table, param, &mut out);
    }
    out.push(')');
    out
}

fn mangle_ty(table: &SymbolTable, ty: &Ty, out: &mut String) {
    match ty {
        Ty::Param(name) => {
            out.push('%');
            out.push_str(name.as_str());
        }
        Ty::Class { class, arguments } => {
            let decl = table.class(*class);
            out.push_str(decl.package.as_str());
            for segment in table.class_path_segments(*class) {
                out.push('.');
                out.push_str(segment.as_str());
            }
            if !arguments.is_empty() {
                out.push('<');
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    mangle_ty(table, argument, out);
                }
                out.push('>');
            }
        }
    }
}
