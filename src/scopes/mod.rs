//! Member scopes and override-aware traversal.
//!
//! A [`Scope`] is a capability, not an owned entity: a queryable view of
//! which declarations are visible by name at some point in a type
//! hierarchy (a class body, a supertype merge, a substitution layer).
//! Scopes are produced on demand by the builder entry points at the
//! bottom of this module and memoized in the [`ScopeSession`]; they are
//! never mutated in place apart from the private single-slot request
//! memo of [`LastRequestsCachedScope`].

mod action;
mod cached;
mod checker;
mod declared;
mod substitution;
mod supertypes;
mod use_site;

use std::rc::Rc;

use crate::base::Name;
use crate::session::{ScopeSession, ScopeSessionKey};
use crate::symbols::{ClassId, ConstructorId, FunctionId, PropertyId, Substitutor, SymbolTable};

pub use action::ProcessorAction;
pub use cached::{with_local_cache, LastRequestsCachedScope};
pub use checker::{OverrideChecker, StandardOverrideChecker};
pub use declared::DeclaredMemberScope;
pub use substitution::SubstitutionScope;
pub use supertypes::SupertypeScope;
pub use use_site::ClassUseSiteScope;

// ============================================================================
// SCOPE
// ============================================================================

/// A queryable view of the members visible by name in some context.
///
/// Every operation has a no-op default so concrete scopes override only
/// what is relevant to them.
pub trait Scope {
    /// Visit classifiers with the given name, together with the
    /// substitution captured while traversing through generic
    /// supertypes.
    fn process_classifiers_by_name(
        &self,
        _table: &SymbolTable,
        _name: &Name,
        _processor: &mut dyn FnMut(ClassId, &Substitutor),
    ) {
    }

    fn process_functions_by_name(
        &self,
        _table: &SymbolTable,
        _name: &Name,
        _processor: &mut dyn FnMut(FunctionId),
    ) {
    }

    fn process_properties_by_name(
        &self,
        _table: &SymbolTable,
        _name: &Name,
        _processor: &mut dyn FnMut(PropertyId),
    ) {
    }

    fn process_declared_constructors(
        &self,
        _table: &SymbolTable,
        _processor: &mut dyn FnMut(ConstructorId),
    ) {
    }

    /// Fast pre-filter. Must never produce a false negative: if this
    /// returns `false`, a full lookup for the name finds nothing.
    fn may_contain_name(&self, _table: &SymbolTable, _name: &Name) -> bool {
        true
    }

    /// Visit the functions the given one overrides, nearest supertype
    /// step first. Traversal aborts as soon as the processor returns
    /// [`ProcessorAction::Stop`]. The default reports
    /// [`ProcessorAction::None`]: no override information available.
    fn process_overridden_functions(
        &self,
        _table: &SymbolTable,
        _function: FunctionId,
        _processor: &mut dyn FnMut(FunctionId) -> ProcessorAction,
    ) -> ProcessorAction {
        ProcessorAction::None
    }
}

/// Capability marker for scopes whose override traversal is genuinely
/// implemented: `process_overridden_functions` never reports
/// [`ProcessorAction::None`].
pub trait OverrideAwareScope: Scope {}

// ============================================================================
// TRAVERSAL HELPERS
// ============================================================================

/// Shared override-traversal algorithm for cooperating scopes.
///
/// A function absent from `direct_overridden` is delegated entirely to
/// the base scope, so a layer that introduces no edge of its own stays
/// transparent. For each direct-overridden function the processor runs
/// first, then the base scope's own traversal for that same function -
/// this is how a substitution layer composes with the scope below it
/// without losing inherited edges.
pub fn do_process_overridden_functions(
    table: &SymbolTable,
    function: FunctionId,
    processor: &mut dyn FnMut(FunctionId) -> ProcessorAction,
    direct_overridden: &rustc_hash::FxHashMap<FunctionId, Vec<FunctionId>>,
    base_scope: &dyn Scope,
) -> ProcessorAction {
    let Some(direct) = direct_overridden.get(&function) else {
        return base_scope.process_overridden_functions(table, function, processor);
    };

    for &overridden in direct {
        if processor(overridden).stop() {
            return ProcessorAction::Stop;
        }
        if base_scope
            .process_overridden_functions(table, overridden, processor)
            .stop()
        {
            return ProcessorAction::Stop;
        }
    }

    ProcessorAction::Next
}

/// Visit the function itself, then its overridden tree.
pub fn process_overridden_functions_and_self(
    scope: &dyn Scope,
    table: &SymbolTable,
    function: FunctionId,
    processor: &mut dyn FnMut(FunctionId) -> ProcessorAction,
) -> ProcessorAction {
    if processor(function).stop() {
        return ProcessorAction::Stop;
    }
    scope.process_overridden_functions(table, function, processor)
}

/// Visit classifiers by name, ignoring the substitution.
pub fn process_classifiers(
    scope: &dyn Scope,
    table: &SymbolTable,
    name: &Name,
    processor: &mut dyn FnMut(ClassId),
) {
    scope.process_classifiers_by_name(table, name, &mut |class, _| processor(class));
}

/// Collect the functions a scope yields for a name, in visit order.
pub fn collect_functions(scope: &dyn Scope, table: &SymbolTable, name: &Name) -> Vec<FunctionId> {
    let mut functions = Vec::new();
    scope.process_functions_by_name(table, name, &mut |function| functions.push(function));
    functions
}

/// Collect the properties a scope yields for a name, in visit order.
pub fn collect_properties(scope: &dyn Scope, table: &SymbolTable, name: &Name) -> Vec<PropertyId> {
    let mut properties = Vec::new();
    scope.process_properties_by_name(table, name, &mut |property| properties.push(property));
    properties
}

// ============================================================================
// DUMMY OVERRIDE-AWARE WRAPPER
// ============================================================================

/// Presents any scope as override-aware with empty override
/// information: every name query forwards to the wrapped scope, and the
/// override traversal visits nothing.
pub struct DummyOverrideAwareScope {
    base: Rc<dyn Scope>,
}

impl DummyOverrideAwareScope {
    pub fn new(base: Rc<dyn Scope>) -> Self {
        Self { base }
    }
}

impl Scope for DummyOverrideAwareScope {
    fn process_classifiers_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(ClassId, &Substitutor),
    ) {
        self.base.process_classifiers_by_name(table, name, processor);
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
        _table: &SymbolTable,
        _function: FunctionId,
        _processor: &mut dyn FnMut(FunctionId) -> ProcessorAction,
    ) -> ProcessorAction {
        ProcessorAction::Next
    }
}

impl OverrideAwareScope for DummyOverrideAwareScope {}

// ============================================================================
// SESSION KEYS AND BUILDER ENTRY POINTS
// ============================================================================

/// Session slot for a class's use-site scope.
pub const USE_SITE_SCOPE: ScopeSessionKey<ClassUseSiteScope> = ScopeSessionKey::new("use-site");

/// Session slot for a class's supertype-merge scope.
pub const SUPERTYPE_SCOPE: ScopeSessionKey<SupertypeScope> = ScopeSessionKey::new("supertypes");

/// The use-site scope of a class: declared members plus inherited
/// members, with direct-override edges computed against `checker`.
/// Memoized in the session.
pub fn use_site_scope(
    table: &SymbolTable,
    session: &ScopeSession,
    checker: &dyn OverrideChecker,
    class: ClassId,
) -> Rc<ClassUseSiteScope> {
    session.get_or_build(class, &USE_SITE_SCOPE, || {
        let supertypes = supertype_scope(table, session, checker, class);
        let declared = DeclaredMemberScope::new(table, class);
        Rc::new(ClassUseSiteScope::build(
            table, checker, class, declared, supertypes,
        ))
    })
}

/// The supertype-merge scope of a class. Memoized in the session;
/// recursively builds the use-site scopes of the supertypes.
pub fn supertype_scope(
    table: &SymbolTable,
    session: &ScopeSession,
    checker: &dyn OverrideChecker,
    class: ClassId,
) -> Rc<SupertypeScope> {
    session.get_or_build(class, &SUPERTYPE_SCOPE, || {
        Rc::new(SupertypeScope::build(table, session, checker, class))
    })
}

/// The supertype-merge scope of a class if the session has one, without
/// building it.
pub fn supertype_scope_if_computed(
    session: &ScopeSession,
    class: ClassId,
) -> Option<Rc<SupertypeScope>> {
    session.get_if_computed(class, &SUPERTYPE_SCOPE)
}
