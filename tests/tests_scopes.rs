//! Scope queries: declared members, supertype merges, substitution,
//! the dummy override-aware wrapper, and the single-slot request memo.

mod helpers;

use std::cell::Cell;
use std::rc::Rc;

use helpers::{class, class_extending, method, new_table};
use semlink::base::Name;
use semlink::scopes::{
    collect_functions, process_overridden_functions_and_self, supertype_scope, use_site_scope,
    with_local_cache, DeclaredMemberScope, DummyOverrideAwareScope, ProcessorAction, Scope,
    StandardOverrideChecker,
};
use semlink::session::ScopeSession;
use semlink::symbols::{ClassDecl, FunctionId, SupertypeRef, SymbolTable, Ty};

#[test]
fn test_declared_scope_finds_only_declared_members() {
    let (mut table, unit) = new_table();
    let a = class(&mut table, "A");
    let b = class_extending(&mut table, "B", &[a]);
    let a_f = method(&mut table, a, "f", unit.clone());
    let b_g = method(&mut table, b, "g", unit.clone());

    let scope = DeclaredMemberScope::new(&table, b);
    assert_eq!(collect_functions(&scope, &table, &Name::new("g")), vec![b_g]);
    assert!(collect_functions(&scope, &table, &Name::new("f")).is_empty());

    let scope_a = DeclaredMemberScope::new(&table, a);
    assert_eq!(collect_functions(&scope_a, &table, &Name::new("f")), vec![a_f]);
}

#[test]
fn test_may_contain_name_has_no_false_negatives() {
    let (mut table, unit) = new_table();
    let a = class(&mut table, "A");
    let b = class_extending(&mut table, "B", &[a]);
    method(&mut table, a, "inherited", unit.clone());
    method(&mut table, b, "declared", unit.clone());

    let session = ScopeSession::new();
    let checker = StandardOverrideChecker;
    let scope = use_site_scope(&table, &session, &checker, b);

    assert!(scope.may_contain_name(&table, &Name::new("declared")));
    assert!(scope.may_contain_name(&table, &Name::new("inherited")));
    // an indexed scope may return false only when lookup finds nothing
    let declared = DeclaredMemberScope::new(&table, b);
    assert!(!declared.may_contain_name(&table, &Name::new("absent")));
    assert!(collect_functions(&declared, &table, &Name::new("absent")).is_empty());
}

#[test]
fn test_use_site_scope_hides_overridden_members() {
    let (mut table, unit) = new_table();
    let a = class(&mut table, "A");
    let b = class_extending(&mut table, "B", &[a]);
    let a_f = method(&mut table, a, "f", unit.clone());
    let b_f = method(&mut table, b, "f", unit.clone());

    let session = ScopeSession::new();
    let checker = StandardOverrideChecker;
    let scope = use_site_scope(&table, &session, &checker, b);

    // the declared override replaces the inherited member
    assert_eq!(collect_functions(scope.as_ref(), &table, &Name::new("f")), vec![b_f]);
    assert_eq!(scope.direct_overridden_functions(b_f), &[a_f]);
}

#[test]
fn test_use_site_scope_yields_inherited_members() {
    let (mut table, unit) = new_table();
    let a = class(&mut table, "A");
    let b = class_extending(&mut table, "B", &[a]);
    let a_f = method(&mut table, a, "f", unit.clone());

    let session = ScopeSession::new();
    let checker = StandardOverrideChecker;
    let scope = use_site_scope(&table, &session, &checker, b);

    assert_eq!(collect_functions(scope.as_ref(), &table, &Name::new("f")), vec![a_f]);
}

#[test]
fn test_supertype_merge_enumerates_in_declaration_order() {
    let (mut table, unit) = new_table();
    let first = class(&mut table, "First");
    let second = class(&mut table, "Second");
    let both = class_extending(&mut table, "Both", &[first, second]);
    let first_f = method(&mut table, first, "f", unit.clone());
    let second_f = method(&mut table, second, "f", unit.clone());

    let session = ScopeSession::new();
    let checker = StandardOverrideChecker;
    let merge = supertype_scope(&table, &session, &checker, both);

    assert_eq!(
        collect_functions(merge.as_ref(), &table, &Name::new("f")),
        vec![first_f, second_f]
    );
    assert_eq!(
        merge.supertype_classes().collect::<Vec<_>>(),
        vec![first, second]
    );
}

#[test]
fn test_substitution_scope_composes_classifier_substitution() {
    let (mut table, unit) = new_table();
    let int = class(&mut table, "Int");
    let mut box_decl = ClassDecl::new("demo", "Box");
    box_decl.type_params = vec![Name::new("T")];
    box_decl.supertypes_resolved = true;
    let box_class = table.add_class(box_decl);
    let mut entry = ClassDecl::new("demo", "Entry");
    entry.owner = Some(box_class);
    entry.supertypes_resolved = true;
    let entry = table.add_class(entry);
    method(&mut table, box_class, "put", unit.clone());

    let int_box = class(&mut table, "IntBox");
    table.set_supertypes(
        int_box,
        vec![SupertypeRef::with_arguments(box_class, vec![Ty::class(int)])],
    );

    let session = ScopeSession::new();
    let checker = StandardOverrideChecker;
    let merge = supertype_scope(&table, &session, &checker, int_box);

    let mut seen = Vec::new();
    merge.process_classifiers_by_name(&table, &Name::new("Entry"), &mut |classifier, subst| {
        seen.push((classifier, subst.substitute(&Ty::param("T"))));
    });
    assert_eq!(seen, vec![(entry, Ty::class(int))]);
}

#[test]
fn test_generic_override_edge_through_substitution() {
    let (mut table, unit) = new_table();
    let int = class(&mut table, "Int");
    let mut box_decl = ClassDecl::new("demo", "Box");
    box_decl.type_params = vec![Name::new("T")];
    box_decl.supertypes_resolved = true;
    let box_class = table.add_class(box_decl);
    let box_put = {
        let mut decl = semlink::symbols::FunctionDecl::new("demo", "put", unit.clone());
        decl.owner = Some(box_class);
        decl.value_params = vec![Ty::param("T")];
        table.add_function(decl)
    };
    let int_box = class(&mut table, "IntBox");
    table.set_supertypes(
        int_box,
        vec![SupertypeRef::with_arguments(box_class, vec![Ty::class(int)])],
    );
    let int_put = {
        let mut decl = semlink::symbols::FunctionDecl::new("demo", "put", unit.clone());
        decl.owner = Some(int_box);
        decl.value_params = vec![Ty::class(int)];
        table.add_function(decl)
    };

    let session = ScopeSession::new();
    let checker = StandardOverrideChecker;
    let scope = use_site_scope(&table, &session, &checker, int_box);
    assert_eq!(scope.direct_overridden_functions(int_put), &[box_put]);
}

fn collect_overridden_tree(
    scope: &dyn Scope,
    table: &SymbolTable,
    function: FunctionId,
) -> (Vec<FunctionId>, ProcessorAction) {
    let mut visited = Vec::new();
    let action = process_overridden_functions_and_self(scope, table, function, &mut |overridden| {
        visited.push(overridden);
        ProcessorAction::Next
    });
    (visited, action)
}

#[test]
fn test_overridden_traversal_and_self() {
    let (mut table, unit) = new_table();
    let a = class(&mut table, "A");
    let b = class_extending(&mut table, "B", &[a]);
    let c = class_extending(&mut table, "C", &[b]);
    let a_f = method(&mut table, a, "f", unit.clone());
    let b_f = method(&mut table, b, "f", unit.clone());
    let c_f = method(&mut table, c, "f", unit.clone());

    let session = ScopeSession::new();
    let checker = StandardOverrideChecker;
    let scope = use_site_scope(&table, &session, &checker, c);

    let (visited, action) = collect_overridden_tree(scope.as_ref(), &table, c_f);
    assert_eq!(visited, vec![c_f, b_f, a_f]);
    assert_eq!(action, ProcessorAction::Next);
}

#[test]
fn test_overridden_traversal_short_circuits_on_stop() {
    let (mut table, unit) = new_table();
    let a = class(&mut table, "A");
    let b = class_extending(&mut table, "B", &[a]);
    let c = class_extending(&mut table, "C", &[b]);
    method(&mut table, a, "f", unit.clone());
    let b_f = method(&mut table, b, "f", unit.clone());
    let c_f = method(&mut table, c, "f", unit.clone());

    let session = ScopeSession::new();
    let checker = StandardOverrideChecker;
    let scope = use_site_scope(&table, &session, &checker, c);

    let mut visited = Vec::new();
    let action = scope.process_overridden_functions(&table, c_f, &mut |overridden| {
        visited.push(overridden);
        ProcessorAction::Stop
    });
    assert_eq!(visited, vec![b_f]);
    assert_eq!(action, ProcessorAction::Stop);
}

#[test]
fn test_dummy_override_aware_wrapper() {
    let (mut table, unit) = new_table();
    let a = class(&mut table, "A");
    let a_f = method(&mut table, a, "f", unit.clone());

    let declared = Rc::new(DeclaredMemberScope::new(&table, a));
    let wrapper = DummyOverrideAwareScope::new(declared);

    // name queries pass through
    assert_eq!(collect_functions(&wrapper, &table, &Name::new("f")), vec![a_f]);
    // override information is empty but supported
    let mut visited = Vec::new();
    let action = wrapper.process_overridden_functions(&table, a_f, &mut |overridden| {
        visited.push(overridden);
        ProcessorAction::Next
    });
    assert!(visited.is_empty());
    assert_eq!(action, ProcessorAction::Next);
}

/// Scope that counts how often each operation actually runs.
struct CountingScope {
    inner: DeclaredMemberScope,
    function_queries: Cell<usize>,
}

impl Scope for CountingScope {
    fn process_functions_by_name(
        &self,
        table: &SymbolTable,
        name: &Name,
        processor: &mut dyn FnMut(FunctionId),
    ) {
        self.function_queries.set(self.function_queries.get() + 1);
        self.inner.process_functions_by_name(table, name, processor);
    }
}

#[test]
fn test_last_requests_memo_serves_repeated_name() {
    let (mut table, unit) = new_table();
    let a = class(&mut table, "A");
    let a_f = method(&mut table, a, "f", unit.clone());
    let a_g = method(&mut table, a, "g", unit.clone());

    let counting = Rc::new(CountingScope {
        inner: DeclaredMemberScope::new(&table, a),
        function_queries: Cell::new(0),
    });
    let cached = with_local_cache(counting.clone());

    assert_eq!(collect_functions(&cached, &table, &Name::new("f")), vec![a_f]);
    assert_eq!(collect_functions(&cached, &table, &Name::new("f")), vec![a_f]);
    // second query for the same name came from the slot
    assert_eq!(counting.function_queries.get(), 1);

    // a different name replaces the slot wholesale
    assert_eq!(collect_functions(&cached, &table, &Name::new("g")), vec![a_g]);
    assert_eq!(counting.function_queries.get(), 2);
    assert_eq!(collect_functions(&cached, &table, &Name::new("f")), vec![a_f]);
    assert_eq!(counting.function_queries.get(), 3);
}
