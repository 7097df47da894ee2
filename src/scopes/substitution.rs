//! Substitution layer over another scope.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::base::Name;
use crate::symbols::{ClassId, ConstructorId, FunctionId, PropertyId, Substitutor, SymbolTable};

use super::{do_process_overridden_functions, OverrideAwareScope, ProcessorAction, Scope};

/// A scope that applies a type-argument substitution on top of a
/// wrapped scope: explicit composition, every call forwarded by hand.
///
/// Classifier queries compose the substitution captured below this
/// layer with this layer's own; everything else passes through. The
/// override traversal runs through the shared helper with an empty
/// direct map, so edges of the wrapped scope survive unchanged.
pub struct SubstitutionScope {
    base: Rc<dyn Scope>,
    substitutor: Substitutor,
    direct_overridden: FxHashMap<FunctionId, Vec<FunctionId>>,
}

impl SubstitutionScope {
    pub fn new(base: Rc<dyn Scope>, substitutor: Substitutor) -> Self {
        Self {
            base,
            substitutor,
            direct_overridden: FxHashMap::default(),
        }
    }

    pub fn substitutor(&self) -> &Substitutor {
        &self.substitutor
    }
}

impl Scope for SubstitutionScope {
    fn process_classifiers_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(ClassId, &Substitutor),
    ) {
        self.base
            .process_classifiers_by_name(table, name, &mut |classifier, inner| {
                let composed = self.substitutor.compose(inner);
                processor(classifier, &composed);
            });
    }

    fn process_functions_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(FunctionId),
    ) {
        self.base.process_functions_by_name(table, name, processor);
    }

    fn process_properties_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(PropertyId),
    ) {
        self.base.process_properties_by_name(table, name, processor);
    }

    fn process_declared_constructors(
        &self,
        table: &SymbolTable,
        processor: &mut dyn FnMut(ConstructorId),
    ) {
        self.base.process_declared_constructors(table, processor);
    }

    fn may_contain_name(&self, table: &SymbolTable, name: &Name) -> bool {
        self.base.may_contain_name(table, name)
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
            self.base.as_ref(),
        )
    }
}

impl OverrideAwareScope for SubstitutionScope {}
