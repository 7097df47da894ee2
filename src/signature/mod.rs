//! Stable declaration signatures for cross-module linking.
//!
//! A [`Signature`] is an immutable value identifying one declaration
//! across compilation units. Signatures are created once, during
//! composition, and then used as cache and map keys, so structural
//! equality and stable hashing are load-bearing.
//!
//! [`Signature::render`] strings are persisted in serialized module
//! metadata as cross-module declaration identifiers. The format is
//! wire-stable: any change to the rendering is a breaking format change.

mod compose;
mod flags;
mod mangle;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use thiserror::Error;

pub use compose::{AccessorKind, DeclarationRef, DefaultSignatureComposer, SignatureComposer};
pub use flags::SignatureFlags;
pub use mangle::{mangle_constructor, mangle_function, mangle_property, signature_id};

/// Error for operations that are invalid on a signature variant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    #[error("{operation} is not supported for a scope-local signature")]
    UnsupportedForScopeLocal { operation: &'static str },
}

// ============================================================================
// SIGNATURE VARIANTS
// ============================================================================

/// Signature of a publicly reachable declaration.
///
/// `declaration_fq_name` is dot-separated: the first segment names the
/// outer container, the last segment is the short name. An empty path
/// with no id is a package signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicSignature {
    pub package_fq_name: Arc<str>,
    pub declaration_fq_name: Arc<str>,
    /// Member-id hash; `None` for classifiers and packages.
    pub id: Option<i64>,
    pub mask: SignatureFlags,
}

impl PublicSignature {
    pub fn new(
        package_fq_name: impl Into<Arc<str>>,
        declaration_fq_name: impl Into<Arc<str>>,
        id: Option<i64>,
        mask: SignatureFlags,
    ) -> Self {
        Self {
            package_fq_name: package_fq_name.into(),
            declaration_fq_name: declaration_fq_name.into(),
            id,
            mask,
        }
    }

    pub fn short_name(&self) -> &str {
        self.declaration_fq_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
    }

    pub fn first_name_segment(&self) -> &str {
        self.declaration_fq_name
            .split('.')
            .next()
            .unwrap_or_default()
    }

    pub fn name_segments(&self) -> impl Iterator<Item = &str> {
        self.declaration_fq_name.split('.')
    }

    pub fn is_package_signature(&self) -> bool {
        self.id.is_none() && self.declaration_fq_name.is_empty()
    }

    pub fn render(&self) -> String {
        let id = match self.id {
            Some(id) => id.to_string(),
            None => "null".to_string(),
        };
        format!(
            "{}/{}|{}[{:b}]",
            self.package_fq_name,
            self.declaration_fq_name,
            id,
            self.mask.bits()
        )
    }
}

/// Signature of a non-public declaration, anchored to its container.
///
/// Identity is the local id alone; the container is carried for
/// rendering and top-level queries only.
#[derive(Debug, Clone)]
pub struct FileLocalSignature {
    pub container: Arc<Signature>,
    pub local_id: i64,
}

impl FileLocalSignature {
    pub fn new(container: Arc<Signature>, local_id: i64) -> Self {
        Self {
            container,
            local_id,
        }
    }

    pub fn render(&self) -> String {
        format!("{}:{}", self.container.render(), self.local_id)
    }
}

impl PartialEq for FileLocalSignature {
    fn eq(&self, other: &Self) -> bool {
        self.local_id == other.local_id
    }
}

impl Eq for FileLocalSignature {}

impl Hash for FileLocalSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.local_id.hash(state);
    }
}

/// Signature of a property accessor.
///
/// Identity delegates to the accessor's own public signature, so an
/// accessor signature and a bare public signature with equal accessor
/// fields compare equal (deduplication across accessor and property
/// identity).
#[derive(Debug, Clone)]
pub struct AccessorSignature {
    pub property: Arc<Signature>,
    pub accessor: PublicSignature,
}

impl AccessorSignature {
    pub fn new(property: Arc<Signature>, accessor: PublicSignature) -> Self {
        Self { property, accessor }
    }
}

impl PartialEq for AccessorSignature {
    fn eq(&self, other: &Self) -> bool {
        self.accessor == other.accessor
    }
}

impl Eq for AccessorSignature {}

impl Hash for AccessorSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.accessor.hash(state);
    }
}

/// Signature of a local variable or value parameter inside a function
/// body. Has no package and no top-level form.
#[derive(Debug, Clone)]
pub struct ScopeLocalSignature {
    pub id: i32,
    pub description: Arc<str>,
}

impl ScopeLocalSignature {
    pub fn new(id: i32, description: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}

impl PartialEq for ScopeLocalSignature {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ScopeLocalSignature {}

impl Hash for ScopeLocalSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// SIGNATURE
// ============================================================================

/// A stable, renderable identity of one declaration.
#[derive(Debug, Clone)]
pub enum Signature {
    Public(PublicSignature),
    FileLocal(FileLocalSignature),
    Accessor(AccessorSignature),
    ScopeLocal(ScopeLocalSignature),
}

impl Signature {
    pub fn is_public(&self) -> bool {
        matches!(self, Signature::Public(_) | Signature::Accessor(_))
    }

    pub fn is_local(&self) -> bool {
        !self.is_public()
    }

    pub fn is_package_signature(&self) -> bool {
        match self {
            Signature::Public(public) => public.is_package_signature(),
            _ => false,
        }
    }

    pub fn has_top_level(&self) -> bool {
        match self {
            Signature::ScopeLocal(_) => false,
            _ => !self.is_package_signature(),
        }
    }

    pub fn flags(&self) -> SignatureFlags {
        match self {
            Signature::Public(public) => public.mask,
            Signature::Accessor(accessor) => accessor.accessor.mask,
            _ => SignatureFlags::empty(),
        }
    }

    pub fn as_public(&self) -> Option<&PublicSignature> {
        match self {
            Signature::Public(public) => Some(public),
            Signature::Accessor(accessor) => Some(&accessor.accessor),
            _ => None,
        }
    }

    /// The signature of the nearest enclosing top-level declaration.
    ///
    /// Recurses through containers; only the recursive flags survive in
    /// the derived mask. A file-local signature whose container is a
    /// private top-level declaration has no further-reducible top-level
    /// form and is returned unchanged.
    pub fn top_level_signature(&self) -> Result<Signature, SignatureError> {
        match self {
            Signature::Public(public) => {
                if public.declaration_fq_name.is_empty() {
                    debug_assert!(public.id.is_none());
                    // package signature
                    return Ok(self.clone());
                }
                if !public.declaration_fq_name.contains('.') {
                    return Ok(self.clone());
                }
                Ok(Signature::Public(PublicSignature {
                    package_fq_name: public.package_fq_name.clone(),
                    declaration_fq_name: Arc::from(public.first_name_segment()),
                    id: None,
                    mask: public.mask.recursive_only(),
                }))
            }
            Signature::Accessor(accessor) => accessor.property.top_level_signature(),
            Signature::FileLocal(file_local) => {
                let top_level = file_local.container.top_level_signature()?;
                if top_level == *file_local.container {
                    if let Signature::Public(public) = &top_level {
                        if public.declaration_fq_name.is_empty() {
                            // private top level
                            return Ok(self.clone());
                        }
                    }
                }
                Ok(top_level)
            }
            Signature::ScopeLocal(_) => Err(SignatureError::UnsupportedForScopeLocal {
                operation: "top_level_signature",
            }),
        }
    }

    /// Walk containers until a public or accessor signature is found.
    pub fn nearest_public_sig(&self) -> Result<Signature, SignatureError> {
        match self {
            Signature::Public(_) | Signature::Accessor(_) => Ok(self.clone()),
            Signature::FileLocal(file_local) => file_local.container.nearest_public_sig(),
            Signature::ScopeLocal(_) => Err(SignatureError::UnsupportedForScopeLocal {
                operation: "nearest_public_sig",
            }),
        }
    }

    pub fn package_fq_name(&self) -> Result<Arc<str>, SignatureError> {
        match self {
            Signature::Public(public) => Ok(public.package_fq_name.clone()),
            Signature::Accessor(accessor) => accessor.property.package_fq_name(),
            Signature::FileLocal(file_local) => file_local.container.package_fq_name(),
            Signature::ScopeLocal(_) => Err(SignatureError::UnsupportedForScopeLocal {
                operation: "package_fq_name",
            }),
        }
    }

    /// Deterministic string form; persisted as the cross-module
    /// identifier, so the format is wire-stable.
    pub fn render(&self) -> String {
        match self {
            Signature::Public(public) => public.render(),
            Signature::FileLocal(file_local) => file_local.render(),
            Signature::Accessor(accessor) => accessor.accessor.render(),
            Signature::ScopeLocal(scope_local) => format!("#{}", scope_local.id),
        }
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Signature::Public(a), Signature::Public(b)) => a == b,
            (Signature::FileLocal(a), Signature::FileLocal(b)) => a == b,
            (Signature::Accessor(a), Signature::Accessor(b)) => a == b,
            (Signature::ScopeLocal(a), Signature::ScopeLocal(b)) => a == b,
            // Accessor and bare public signatures with equal accessor
            // fields are the same declaration.
            (Signature::Accessor(a), Signature::Public(p))
            | (Signature::Public(p), Signature::Accessor(a)) => a.accessor == *p,
            _ => false,
        }
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // No discriminant: an accessor must hash like the public
        // signature it compares equal to.
        match self {
            Signature::Public(public) => public.hash(state),
            Signature::FileLocal(file_local) => file_local.hash(state),
            Signature::Accessor(accessor) => accessor.hash(state),
            Signature::ScopeLocal(scope_local) => scope_local.hash(state),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visibility = if self.is_public() { "public" } else { "private" };
        write!(f, "{} {}", visibility, self.render())
    }
}
