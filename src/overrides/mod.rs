//! Transitive override closures.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::scopes::{supertype_scope, OverrideChecker, StandardOverrideChecker};
use crate::session::ScopeSession;
use crate::symbols::{ClassId, FunctionId, SymbolTable};

/// Computes the complete transitive set of functions a member
/// overrides. Results feed redundancy diagnostics, bridge generation,
/// and name mangling, so their iteration order (first-reached order) is
/// stable within a session.
///
/// The memo is keyed by function symbol alone and reused across owners:
/// direct-override edges are a property of the declaration pair, not of
/// the query owner.
pub struct OverriddenDeclarationsProvider {
    checker: Box<dyn OverrideChecker>,
    computed: RefCell<FxHashMap<FunctionId, Rc<IndexSet<FunctionId>>>>,
    in_progress: RefCell<FxHashSet<FunctionId>>,
}

impl OverriddenDeclarationsProvider {
    pub fn new(checker: Box<dyn OverrideChecker>) -> Self {
        Self {
            checker,
            computed: RefCell::new(FxHashMap::default()),
            in_progress: RefCell::new(FxHashSet::default()),
        }
    }

    /// Provider with the standard override-compatibility rules.
    pub fn standard() -> Self {
        Self::new(Box::new(StandardOverrideChecker))
    }

    pub fn checker(&self) -> &dyn OverrideChecker {
        self.checker.as_ref()
    }

    /// All functions `function` overrides, transitively, queried as a
    /// member of `owner`.
    ///
    /// Empty when the function is private, or when `owner`'s supertypes
    /// have not been resolved yet - querying before supertype
    /// resolution under-reports rather than forcing resolution, so
    /// callers must sequence their queries after it.
    pub fn overridden_functions(
        &self,
        table: &SymbolTable,
        session: &ScopeSession,
        owner: ClassId,
        function: FunctionId,
    ) -> Rc<IndexSet<FunctionId>> {
        if let Some(cached) = self.computed.borrow().get(&function) {
            return cached.clone();
        }
        // Cycle defense: the supertype graph is acyclic by upstream
        // invariant; a re-entered computation terminates the walk with
        // an under-approximation instead of recursing forever.
        if !self.in_progress.borrow_mut().insert(function) {
            return Rc::new(IndexSet::new());
        }
        let result = Rc::new(self.compute_overridden_functions(table, session, owner, function));
        self.in_progress.borrow_mut().remove(&function);
        self.computed.borrow_mut().insert(function, result.clone());
        result
    }

    fn compute_overridden_functions(
        &self,
        table: &SymbolTable,
        session: &ScopeSession,
        owner: ClassId,
        function: FunctionId,
    ) -> IndexSet<FunctionId> {
        let decl = table.function(function);
        if decl.visibility.is_private() {
            return IndexSet::new();
        }
        if !table.class(owner).supertypes_resolved {
            trace!(
                "[OVERRIDES] supertypes of {:?} not resolved yet, empty closure for {}",
                owner,
                decl.name
            );
            return IndexSet::new();
        }
        let supertypes = supertype_scope(table, session, self.checker.as_ref(), owner);

        let mut direct = Vec::new();
        supertypes.for_each_function_with_substitution(
            table,
            &decl.name,
            &mut |candidate, substitutor| {
                if !direct.contains(&candidate)
                    && self
                        .checker
                        .is_override(table, function, candidate, substitutor)
                {
                    direct.push(candidate);
                }
            },
        );

        let mut all = IndexSet::new();
        // `expanded` is separate from the result set: a function
        // reachable through several direct paths is still expanded only
        // once, with identical output.
        let mut expanded = FxHashSet::default();
        for &overridden in &direct {
            all.insert(overridden);
            if expanded.insert(overridden) {
                if let Some(overridden_owner) = table.function(overridden).owner {
                    let transitive =
                        self.overridden_functions(table, session, overridden_owner, overridden);
                    for &function in transitive.iter() {
                        all.insert(function);
                    }
                }
            }
        }
        trace!(
            "[OVERRIDES] {} in {:?}: {} direct, {} total",
            decl.name,
            owner,
            direct.len(),
            all.len()
        );
        all
    }
}

impl Default for OverriddenDeclarationsProvider {
    fn default() -> Self {
        Self::standard()
    }
}
