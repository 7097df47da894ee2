//! The declaration model the resolution engine operates on.
//!
//! Declarations live in a [`SymbolTable`] arena and are referenced by
//! compact `u32` newtype ids everywhere else. The model is deliberately
//! small: just enough structure (names, owners, visibilities, parameter
//! and return types, supertype references) for scope queries, override
//! checking, and signature composition. Parsing and full name resolution
//! against imports happen upstream and hand their results to this table.

mod decl;
mod table;
mod types;

pub use decl::{
    ClassDecl, ClassId, ClassKind, ConstructorDecl, ConstructorId, FunctionDecl, FunctionId,
    Modality, PropertyDecl, PropertyId, SupertypeRef, Visibility,
};
pub use table::SymbolTable;
pub use types::{Substitutor, Ty};
