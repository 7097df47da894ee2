//! The use-site view of a class.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::base::Name;
use crate::symbols::{ClassId, ConstructorId, FunctionId, PropertyId, Substitutor, SymbolTable};

use super::{
    do_process_overridden_functions, DeclaredMemberScope, OverrideAwareScope, OverrideChecker,
    ProcessorAction, Scope, SupertypeScope,
};

/// Members visible on a class at its use site: the declared members
/// plus the inherited ones, with a declared override hiding the
/// supertype member it replaces.
///
/// The direct-override map (declared function to the supertype members
/// it overrides, one supertype step away) is computed once at
/// construction and drives [`Scope::process_overridden_functions`].
pub struct ClassUseSiteScope {
    owner: ClassId,
    declared: DeclaredMemberScope,
    supertypes: Rc<SupertypeScope>,
    direct_overridden: FxHashMap<FunctionId, Vec<FunctionId>>,
    /// Inherited functions hidden by a declared override.
    hidden: FxHashSet<FunctionId>,
}

impl ClassUseSiteScope {
    pub(super) fn build(
        table: &SymbolTable,
        checker: &dyn OverrideChecker,
        owner: ClassId,
        declared: DeclaredMemberScope,
        supertypes: Rc<SupertypeScope>,
    ) -> Self {
        let mut direct_overridden: FxHashMap<FunctionId, Vec<FunctionId>> = FxHashMap::default();
        for &function in &table.class(owner).functions {
            let decl = table.function(function);
            // private members never participate in override relations
            if decl.visibility.is_private() {
                continue;
            }
            let mut overridden = Vec::new();
            supertypes.for_each_function_with_substitution(
                table,
                &decl.name,
                &mut |candidate, substitutor| {
                    if !overridden.contains(&candidate)
                        && checker.is_override(table, function, candidate, substitutor)
                    {
                        overridden.push(candidate);
                    }
                },
            );
            if !overridden.is_empty() {
                trace!(
                    "[USE_SITE] {:?}: {} directly overrides {} member(s)",
                    owner,
                    decl.name,
                    overridden.len()
                );
                direct_overridden.insert(function, overridden);
            }
        }
        let hidden = direct_overridden.values().flatten().copied().collect();
        Self {
            owner,
            declared,
            supertypes,
            direct_overridden,
            hidden,
        }
    }

    pub fn owner(&self) -> ClassId {
        self.owner
    }

    /// The supertype members the given declared function overrides in
    /// one supertype step.
    pub fn direct_overridden_functions(&self, function: FunctionId) -> &[FunctionId] {
        self.direct_overridden
            .get(&function)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Scope for ClassUseSiteScope {
    fn process_classifiers_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(ClassId, &Substitutor),
    ) {
        self.declared
            .process_classifiers_by_name(table, name, processor);
        self.supertypes
            .process_classifiers_by_name(table, name, processor);
    }

    fn process_functions_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(FunctionId),
    ) {
        self.declared.process_functions_by_name(table, name, processor);
        self.supertypes
            .process_functions_by_name(table, name, &mut |function| {
                if !self.hidden.contains(&function) {
                    processor(function);
                }
            });
    }

    fn process_properties_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(PropertyId),
    ) {
        self.declared
            .process_properties_by_name(table, name, processor);
        self.supertypes
            .process_properties_by_name(table, name, processor);
    }

    fn process_declared_constructors(
        &self,
        table: &SymbolTable,
        processor: &mut dyn FnMut(ConstructorId),
    ) {
        // constructors are not inherited
        self.declared.process_declared_constructors(table, processor);
    }

    fn may_contain_name(&self, table: &SymbolTable, name: &Name) -> bool {
        self.declared.may_contain_name(table, name)
            || self.supertypes.may_contain_name(table, name)
    }

    fn process_overridden_functions(
        &self,
        table: &SymbolTable,
        function: FunctionId,
        processor: &mut dyn FnMut(FunctionId) -> ProcessorAction,
    ) -> ProcessorAction {
        do_process_overridden_functions(
            table,
            function,
            processor,
            &self.direct_overridden,
            self.supertypes.as_ref() as &dyn Scope,
        )
    }
}

impl OverrideAwareScope for ClassUseSiteScope {}
