//! Structural types and generic-argument substitution.

use rustc_hash::FxHashMap;

use crate::base::Name;

use super::decl::ClassId;

/// A structural type, as far as override comparison needs one: a
/// classifier application or a reference to an enclosing type parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    Class { class: ClassId, arguments: Vec<Ty> },
    Param(Name),
}

impl Ty {
    /// A non-generic classifier type.
    pub fn class(class: ClassId) -> Self {
        Ty::Class {
            class,
            arguments: Vec::new(),
        }
    }

    /// A classifier type with generic arguments.
    pub fn generic(class: ClassId, arguments: Vec<Ty>) -> Self {
        Ty::Class { class, arguments }
    }

    /// A reference to a type parameter of the enclosing declaration.
    pub fn param(name: impl Into<Name>) -> Self {
        Ty::Param(name.into())
    }
}

/// Mapping from type-parameter names to argument types, captured while
/// traversing through a generic supertype reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitutor {
    map: FxHashMap<Name, Ty>,
}

impl Substitutor {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the substitutor for a supertype reference: the supertype's
    /// parameters zipped with the arguments applied at the use site.
    /// Unmatched trailing parameters stay unmapped.
    pub fn new(params: &[Name], arguments: &[Ty]) -> Self {
        let map = params
            .iter()
            .zip(arguments)
            .map(|(param, argument)| (param.clone(), argument.clone()))
            .collect();
        Self { map }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Apply the substitution. Unmapped parameters are left as-is.
    pub fn substitute(&self, ty: &Ty) -> Ty {
        match ty {
            Ty::Param(name) => self.map.get(name).cloned().unwrap_or_else(|| ty.clone()),
            Ty::Class { class, arguments } => Ty::Class {
                class: *class,
                arguments: arguments.iter().map(|arg| self.substitute(arg)).collect(),
            },
        }
    }

    /// Compose with an inner substitutor: the result first maps through
    /// `inner`, then through `self`. Bindings of `self` not shadowed by
    /// `inner` are kept.
    pub fn compose(&self, inner: &Substitutor) -> Substitutor {
        let mut map: FxHashMap<Name, Ty> = inner
            .map
            .iter()
            .map(|(name, ty)| (name.clone(), self.substitute(ty)))
            .collect();
        for (name, ty) in &self.map {
            map.entry(name.clone()).or_insert_with(|| ty.clone());
        }
        Substitutor { map }
    }
}
