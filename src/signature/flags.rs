//! Modifier flags carried in a public signature's mask.

use bitflags::bitflags;

bitflags! {
    /// Flag mask of a public signature.
    ///
    /// Each flag is either recursive (propagates to ancestor and
    /// top-level signatures) or not; [`SignatureFlags::recursive_only`]
    /// strips the non-recursive ones when a containing signature is
    /// derived.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SignatureFlags: u64 {
        /// Expectation declaration; recursive.
        const IS_EXPECT = 1 << 0;
        /// Synthetic override bridging a foreign-interop property; not recursive.
        const IS_SYNTHETIC_OVERRIDE = 1 << 1;
        /// Declaration originates from a native-interop library; recursive.
        const IS_NATIVE_INTEROP = 1 << 2;
    }
}

impl SignatureFlags {
    /// The flags that propagate to ancestor signatures.
    pub const RECURSIVE: SignatureFlags = Self::IS_EXPECT.union(Self::IS_NATIVE_INTEROP);

    /// Keep only the recursive flags.
    pub fn recursive_only(self) -> Self {
        self & Self::RECURSIVE
    }
}
