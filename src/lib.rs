//! # semlink
//!
//! Scope resolution, override closures, and stable declaration signatures
//! for compiler front-ends.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! overrides → transitive override closures (diagnostics, bridges, mangling)
//!   ↓
//! scopes    → member scopes and override-aware traversal
//!   ↓
//! session   → per-analysis-session scope cache
//!   ↓
//! signature → stable declaration signatures (linking, serialization)
//!   ↓
//! symbols   → declaration model (classes, members, types, substitution)
//!   ↓
//! base      → primitives (Name)
//! ```

// ============================================================================
// MODULES (dependency order: base → symbols → signature → session → scopes →
// overrides)
// ============================================================================

/// Foundation types: Name
pub mod base;

/// Declaration model: arena-stored classes, members, types, substitution
pub mod symbols;

/// Stable declaration signatures for cross-module linking and serialization
pub mod signature;

/// Per-analysis-session scope cache with typed keys
pub mod session;

/// Member scopes, override-aware traversal, override-compatibility rules
pub mod scopes;

/// Transitive override closure computation
pub mod overrides;

// Re-export the types most consumers touch
pub use base::Name;
pub use overrides::OverriddenDeclarationsProvider;
pub use scopes::{OverrideChecker, ProcessorAction, Scope, StandardOverrideChecker};
pub use session::{ScopeSession, ScopeSessionKey};
pub use signature::{Signature, SignatureComposer, SignatureError, SignatureFlags};
pub use symbols::{ClassId, ConstructorId, FunctionId, PropertyId, SymbolTable};
