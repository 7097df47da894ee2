//! Single-slot request memo over another scope.

use std::cell::RefCell;
use std::rc::Rc;

use crate::base::Name;
use crate::symbols::{ClassId, ConstructorId, FunctionId, PropertyId, Substitutor, SymbolTable};

use super::{ProcessorAction, Scope};

/// Wraps a scope and remembers only the most recent query result per
/// operation kind - a single slot, not a general map, for hot
/// repeated-same-name access patterns. A query for a different name
/// replaces the slot wholesale.
///
/// Safe only under the session's single-writer assumption; interleaved
/// queries for different names merely thrash the slot and recompute.
pub struct LastRequestsCachedScope {
    base: Rc<dyn Scope>,
    last_classifiers: RefCell<Option<(Name, Vec<(ClassId, Substitutor)>)>>,
    last_functions: RefCell<Option<(Name, Vec<FunctionId>)>>,
    last_properties: RefCell<Option<(Name, Vec<PropertyId>)>>,
}

impl LastRequestsCachedScope {
    pub fn new(base: Rc<dyn Scope>) -> Self {
        Self {
            base,
            last_classifiers: RefCell::new(None),
            last_functions: RefCell::new(None),
            last_properties: RefCell::new(None),
        }
    }
}

/// Wrap a scope with the single-slot request memo.
pub fn with_local_cache(base: Rc<dyn Scope>) -> LastRequestsCachedScope {
    LastRequestsCachedScope::new(base)
}

impl Scope for LastRequestsCachedScope {
    fn process_classifiers_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(ClassId, &Substitutor),
    ) {
        let cached = {
            let slot = self.last_classifiers.borrow();
            match &*slot {
                Some((cached_name, results)) if cached_name == name => Some(results.clone()),
                _ => None,
            }
        };
        if let Some(results) = cached {
            for (classifier, substitutor) in &results {
                processor(*classifier, substitutor);
            }
            return;
        }
        let mut results = Vec::new();
        self.base
            .process_classifiers_by_name(table, name, &mut |classifier, substitutor| {
                results.push((classifier, substitutor.clone()));
            });
        *self.last_classifiers.borrow_mut() = Some((name.clone(), results.clone()));
        for (classifier, substitutor) in &results {
            processor(*classifier, substitutor);
        }
    }

    fn process_functions_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(FunctionId),
    ) {
        let cached = {
            let slot = self.last_functions.borrow();
            match &*slot {
                Some((cached_name, results)) if cached_name == name => Some(results.clone()),
                _ => None,
            }
        };
        if let Some(results) = cached {
            for function in results {
                processor(function);
            }
            return;
        }
        let mut results = Vec::new();
        self.base
            .process_functions_by_name(table, name, &mut |function| results.push(function));
        *self.last_functions.borrow_mut() = Some((name.clone(), results.clone()));
        for function in results {
            processor(function);
        }
    }

    fn process_properties_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(PropertyId),
    ) {
        let cached = {
            let slot = self.last_properties.borrow();
            match &*slot {
                Some((cached_name, results)) if cached_name == name => Some(results.clone()),
                _ => None,
            }
        };
        if let Some(results) = cached {
            for property in results {
                processor(property);
            }
            return;
        }
        let mut results = Vec::new();
        self.base
            .process_properties_by_name(table, name, &mut |property| results.push(property));
        *self.last_properties.borrow_mut() = Some((name.clone(), results.clone()));
        for property in results {
            processor(property);
        }
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
        self.base
            .process_overridden_functions(table, function, processor)
    }
}
