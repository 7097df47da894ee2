//! Override-compatibility rules.

use crate::symbols::{FunctionId, Modality, Substitutor, SymbolTable, Ty};

/// Judges whether one function genuinely overrides another.
///
/// Owned by the language rules, not by this engine: consumers plug in
/// their own implementation; the scopes and the closure computer only
/// ask.
pub trait OverrideChecker {
    /// Whether `derived` overrides `base`, with `substitutor` mapping
    /// the base owner's type parameters to the arguments applied at the
    /// supertype reference.
    fn is_override(
        &self,
        table: &SymbolTable,
        derived: FunctionId,
        base: FunctionId,
        substitutor: &Substitutor,
    ) -> bool;
}

/// Default rules: same name, base neither private nor final, receiver
/// presence matches, same arity, parameter types equal up to
/// substitution, return type compatible up to substitution.
pub struct StandardOverrideChecker;

impl StandardOverrideChecker {
    fn is_return_compatible(table: &SymbolTable, derived: &Ty, base: &Ty) -> bool {
        if derived == base {
            return true;
        }
        // covariant classifier returns
        match (derived, base) {
            (
                Ty::Class {
                    class: derived_class,
                    ..
                },
                Ty::Class {
                    class: base_class, ..
                },
            ) => table.is_subclass_of(*derived_class, *base_class),
            _ => false,
        }
    }
}

impl OverrideChecker for StandardOverrideChecker {
    fn is_override(
        &self,
        table: &SymbolTable,
        derived: FunctionId,
        base: FunctionId,
        substitutor: &Substitutor,
    ) -> bool {
        if derived == base {
            return false;
        }
        let derived_decl = table.function(derived);
        let base_decl = table.function(base);

        if derived_decl.name != base_decl.name {
            return false;
        }
        if base_decl.visibility.is_private() || base_decl.modality == Modality::Final {
            return false;
        }
        if derived_decl.receiver.is_some() != base_decl.receiver.is_some() {
            return false;
        }
        if let (Some(derived_receiver), Some(base_receiver)) =
            (&derived_decl.receiver, &base_decl.receiver)
        {
            if *derived_receiver != substitutor.substitute(base_receiver) {
                return false;
            }
        }
        if derived_decl.value_params.len() != base_decl.value_params.len() {
            return false;
        }
        for (derived_param, base_param) in derived_decl
            .value_params
            .iter()
            .zip(&base_decl.value_params)
        {
            if *derived_param != substitutor.substitute(base_param) {
                return false;
            }
        }
        Self::is_return_compatible(
            table,
            &derived_decl.return_type,
            &substitutor.substitute(&base_decl.return_type),
        )
    }
}
