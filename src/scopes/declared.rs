//! Scope over the members declared directly in one class body.

use rustc_hash::FxHashMap;

use crate::base::Name;
use crate::symbols::{ClassId, ConstructorId, FunctionId, PropertyId, Substitutor, SymbolTable};

use super::Scope;

/// Members declared directly in one class, indexed by name at
/// construction. Inherited members are not visible here; that is the
/// use-site scope's job.
pub struct DeclaredMemberScope {
    owner: ClassId,
    functions_by_name: FxHashMap<Name, Vec<FunctionId>>,
    properties_by_name: FxHashMap<Name, Vec<PropertyId>>,
    classifiers_by_name: FxHashMap<Name, Vec<ClassId>>,
    constructors: Vec<ConstructorId>,
}

impl DeclaredMemberScope {
    pub fn new(table: &SymbolTable, owner: ClassId) -> Self {
        let decl = table.class(owner);

        let mut functions_by_name: FxHashMap<Name, Vec<FunctionId>> = FxHashMap::default();
        for &function in &decl.functions {
            functions_by_name
                .entry(table.function(function).name.clone())
                .or_default()
                .push(function);
        }

        let mut properties_by_name: FxHashMap<Name, Vec<PropertyId>> = FxHashMap::default();
        for &property in &decl.properties {
            properties_by_name
                .entry(table.property(property).name.clone())
                .or_default()
                .push(property);
        }

        let mut classifiers_by_name: FxHashMap<Name, Vec<ClassId>> = FxHashMap::default();
        for &nested in &decl.nested_classes {
            classifiers_by_name
                .entry(table.class(nested).name.clone())
                .or_default()
                .push(nested);
        }

        Self {
            owner,
            functions_by_name,
            properties_by_name,
            classifiers_by_name,
            constructors: decl.constructors.clone(),
        }
    }

    pub fn owner(&self) -> ClassId {
        self.owner
    }
}

impl Scope for DeclaredMemberScope {
    fn process_classifiers_by_name(
        &self,
        _table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(ClassId, &Substitutor),
    ) {
        if let Some(classifiers) = self.classifiers_by_name.get(name) {
            let substitutor = Substitutor::empty();
            for &classifier in classifiers {
                processor(classifier, &substitutor);
            }
        }
    }

    fn process_functions_by_name(
        &self,
        _table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(FunctionId),
    ) {
        if let Some(functions) = self.functions_by_name.get(name) {
            for &function in functions {
                processor(function);
            }
        }
    }

    fn process_properties_by_name(
        &self,
        _table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(PropertyId),
    ) {
        if let Some(properties) = self.properties_by_name.get(name) {
            for &property in properties {
                processor(property);
            }
        }
    }

    fn process_declared_constructors(
        &self,
        _table: &SymbolTable,
        processor: &mut dyn FnMut(ConstructorId),
    ) {
        for &constructor in &self.constructors {
            processor(constructor);
        }
    }

    fn may_contain_name(&self, _table: &SymbolTable, name: &Name) -> bool {
        self.functions_by_name.contains_key(name)
            || self.properties_by_name.contains_key(name)
            || self.classifiers_by_name.contains_key(name)
    }
}
