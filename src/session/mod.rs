//! Per-analysis-session scope cache.
//!
//! Scopes are expensive to build and queried repeatedly, so one
//! [`ScopeSession`] per compilation/analysis session memoizes them by
//! `(owner, key)`. The session only memoizes - consumers supply the
//! builder for each scope kind. A session is confined to one analysis
//! worker; access is not synchronized.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::symbols::ClassId;

/// Typed cache-slot key: the key value determines the scope type stored
/// under it, so a given `(owner, key)` pair is type-safe for the whole
/// session. Two keys with the same name and scope type address the same
/// slot.
pub struct ScopeSessionKey<S> {
    name: &'static str,
    _scope: PhantomData<fn() -> S>,
}

impl<S: 'static> ScopeSessionKey<S> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _scope: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn slot(&self) -> SlotKey {
        (self.name, TypeId::of::<S>())
    }
}

type SlotKey = (&'static str, TypeId);

/// Keyed scope cache: compute on first access, memoize for the session.
///
/// Invalidation is wholesale - the session is dropped when its analysis
/// generation is torn down; entries are never evicted one by one.
#[derive(Default)]
pub struct ScopeSession {
    scopes: RefCell<FxHashMap<ClassId, FxHashMap<SlotKey, Rc<dyn Any>>>>,
    in_flight: RefCell<FxHashSet<(ClassId, SlotKey)>>,
    return_type_calculator: RefCell<Option<Rc<dyn Any>>>,
}

impl ScopeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure lookup; `None` on miss, no computation.
    pub fn get_if_computed<S: 'static>(
        &self,
        id: ClassId,
        key: &ScopeSessionKey<S>,
    ) -> Option<Rc<S>> {
        let scopes = self.scopes.borrow();
        let value = scopes.get(&id)?.get(&key.slot())?.clone();
        // The slot key carries the scope TypeId, so this always succeeds.
        value.downcast::<S>().ok()
    }

    /// Cached value if present; otherwise invoke `build` exactly once
    /// and store the result under `(id, key)`.
    ///
    /// No borrow is held across the builder call: a builder may re-enter
    /// the session for *other* keys (recursive supertype scope
    /// construction). Re-entering the same `(id, key)` means the
    /// supertype graph is cyclic or the builder is broken, and fails
    /// fast. A builder panic leaves no entry behind, so a later call
    /// re-attempts the build.
    pub fn get_or_build<S: 'static>(
        &self,
        id: ClassId,
        key: &ScopeSessionKey<S>,
        build: impl FnOnce() -> Rc<S>,
    ) -> Rc<S> {
        if let Some(existing) = self.get_if_computed(id, key) {
            return existing;
        }
        trace!("[SCOPE_SESSION] miss id={:?} key={}", id, key.name());

        let slot = (id, key.slot());
        if !self.in_flight.borrow_mut().insert(slot) {
            panic!(
                "re-entrant scope build for key `{}` of {:?}: cyclic supertype graph?",
                key.name(),
                id
            );
        }
        let guard = InFlightGuard {
            session: self,
            slot,
        };
        let built = build();
        drop(guard);

        self.scopes
            .borrow_mut()
            .entry(id)
            .or_default()
            .insert(key.slot(), built.clone());
        built
    }

    /// Session-scoped auxiliary slot kept for legacy callers; new code
    /// should not use it.
    pub fn set_return_type_calculator(&self, value: Rc<dyn Any>) {
        *self.return_type_calculator.borrow_mut() = Some(value);
    }

    pub fn return_type_calculator(&self) -> Option<Rc<dyn Any>> {
        self.return_type_calculator.borrow().clone()
    }
}

struct InFlightGuard<'a> {
    session: &'a ScopeSession,
    slot: (ClassId, SlotKey),
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.in_flight.borrow_mut().remove(&self.slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeScope {
        owner: ClassId,
    }

    const FAKE: ScopeSessionKey<FakeScope> = ScopeSessionKey::new("fake");

    #[test]
    fn test_get_if_computed_before_build_is_none() {
        let session = ScopeSession::new();
        assert!(session.get_if_computed(ClassId::new(0), &FAKE).is_none());
    }

    #[test]
    fn test_builder_runs_exactly_once() {
        let session = ScopeSession::new();
        let id = ClassId::new(3);
        let calls = Cell::new(0);

        let build = || {
            calls.set(calls.get() + 1);
            Rc::new(FakeScope { owner: id })
        };
        let first = session.get_or_build(id, &FAKE, build);
        let second = session.get_or_build(id, &FAKE, || {
            calls.set(calls.get() + 1);
            Rc::new(FakeScope { owner: id })
        });

        assert_eq!(calls.get(), 1);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(session.get_if_computed(id, &FAKE).unwrap().owner, id);
    }

    #[test]
    fn test_distinct_keys_are_distinct_slots() {
        const OTHER: ScopeSessionKey<FakeScope> = ScopeSessionKey::new("other");
        let session = ScopeSession::new();
        let id = ClassId::new(1);

        session.get_or_build(id, &FAKE, || Rc::new(FakeScope { owner: id }));
        assert!(session.get_if_computed(id, &OTHER).is_none());
    }

    #[test]
    fn test_builder_may_reenter_for_other_keys() {
        let session = ScopeSession::new();
        let outer = ClassId::new(0);
        let inner = ClassId::new(1);

        let scope = session.get_or_build(outer, &FAKE, || {
            let nested = session.get_or_build(inner, &FAKE, || Rc::new(FakeScope { owner: inner }));
            Rc::new(FakeScope { owner: nested.owner })
        });
        assert_eq!(scope.owner, inner);
        assert!(session.get_if_computed(inner, &FAKE).is_some());
    }

    #[test]
    #[should_panic(expected = "re-entrant scope build")]
    fn test_same_key_reentrancy_fails_fast() {
        let session = ScopeSession::new();
        let id = ClassId::new(0);
        session.get_or_build(id, &FAKE, || {
            session.get_or_build(id, &FAKE, || Rc::new(FakeScope { owner: id }))
        });
    }

    #[test]
    fn test_return_type_calculator_slot() {
        let session = ScopeSession::new();
        assert!(session.return_type_calculator().is_none());
        session.set_return_type_calculator(Rc::new(17_u32));
        let value = session.return_type_calculator().unwrap();
        assert_eq!(*value.downcast::<u32>().unwrap(), 17);
    }
}
