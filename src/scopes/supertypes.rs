//! Merged view of a class's resolved supertypes.

use std::rc::Rc;

use tracing::trace;

use crate::base::Name;
use crate::session::ScopeSession;
use crate::symbols::{ClassId, FunctionId, PropertyId, Substitutor, SymbolTable};

use super::{
    use_site_scope, OverrideAwareScope, OverrideChecker, ProcessorAction, Scope, SubstitutionScope,
};

struct SupertypeEntry {
    class: ClassId,
    /// Maps the supertype's parameters to the arguments applied at the
    /// reference.
    substitutor: Substitutor,
    /// The supertype's use-site scope, substitution-wrapped when the
    /// reference is generic.
    member_scope: Rc<dyn Scope>,
}

/// The supertype merge of one class: one member scope per resolved
/// supertype, in declaration order. That order is the enumeration order
/// of every query, so results are deterministic within a session.
///
/// A member reachable through several supertype paths (diamond
/// inheritance) is reported once per path; deduplication is the
/// caller's concern.
pub struct SupertypeScope {
    owner: ClassId,
    supertypes: Vec<SupertypeEntry>,
}

impl SupertypeScope {
    pub(super) fn build(
        table: &SymbolTable,
        session: &ScopeSession,
        checker: &dyn OverrideChecker,
        owner: ClassId,
    ) -> Self {
        let decl = table.class(owner);
        let mut supertypes = Vec::with_capacity(decl.supertypes.len());
        for super_ref in &decl.supertypes {
            let super_decl = table.class(super_ref.class);
            let substitutor = Substitutor::new(&super_decl.type_params, &super_ref.arguments);
            let use_site = use_site_scope(table, session, checker, super_ref.class);
            let member_scope: Rc<dyn Scope> = if substitutor.is_empty() {
                use_site
            } else {
                Rc::new(SubstitutionScope::new(use_site, substitutor.clone()))
            };
            supertypes.push(SupertypeEntry {
                class: super_ref.class,
                substitutor,
                member_scope,
            });
        }
        trace!(
            "[SUPERTYPES] built merge for {:?}: {} supertypes",
            owner,
            supertypes.len()
        );
        Self { owner, supertypes }
    }

    pub fn owner(&self) -> ClassId {
        self.owner
    }

    pub fn supertype_classes(&self) -> impl Iterator<Item = ClassId> {
        self.supertypes.iter().map(|entry| entry.class)
    }

    /// Visit same-named functions across the merge together with the
    /// substitutor of the supertype each one surfaced through. This is
    /// what override-candidate collection runs on.
    pub fn for_each_function_with_substitution(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(FunctionId, &Substitutor),
    ) {
        for entry in &self.supertypes {
            entry
                .member_scope
                .process_functions_by_name(table, name, &mut |function| {
                    processor(function, &entry.substitutor);
                });
        }
    }
}

impl Scope for SupertypeScope {
    fn process_classifiers_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(ClassId, &Substitutor),
    ) {
        for entry in &self.supertypes {
            entry
                .member_scope
                .process_classifiers_by_name(table, name, processor);
        }
    }

    fn process_functions_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(FunctionId),
    ) {
        for entry in &self.supertypes {
            entry
                .member_scope
                .process_functions_by_name(table, name, processor);
        }
    }

    fn process_properties_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(PropertyId),
    ) {
        for entry in &self.supertypes {
            entry
                .member_scope
                .process_properties_by_name(table, name, processor);
        }
    }

    fn may_contain_name(&self, table: &SymbolTable, name: &Name) -> bool {
        self.supertypes
            .iter()
            .any(|entry| entry.member_scope.may_contain_name(table, name))
    }

    fn process_overridden_functions(
        &self,
        table: &SymbolTable,
        function: FunctionId,
        processor: &mut dyn FnMut(FunctionId) -> ProcessorAction,
    ) -> ProcessorAction {
        let mut result = ProcessorAction::None;
        for entry in &self.supertypes {
            let action = entry
                .member_scope
                .process_overridden_functions(table, function, processor);
            if action.stop() {
                return ProcessorAction::Stop;
            }
            result = result + action;
        }
        result
    }
}

impl OverrideAwareScope for SupertypeScope {}
