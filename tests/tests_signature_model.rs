//! Structural properties of the signature value types.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use semlink::signature::{
    AccessorSignature, FileLocalSignature, PublicSignature, ScopeLocalSignature,
};
use semlink::{Signature, SignatureError, SignatureFlags};

fn hash_of(signature: &Signature) -> u64 {
    let mut hasher = DefaultHasher::new();
    signature.hash(&mut hasher);
    hasher.finish()
}

fn public(path: &str, id: Option<i64>, mask: SignatureFlags) -> Signature {
    Signature::Public(PublicSignature::new("demo.pkg", path, id, mask))
}

#[test]
fn test_equal_signatures_hash_equal() {
    let cases = [
        public("Outer.member", Some(5), SignatureFlags::IS_EXPECT),
        Signature::FileLocal(FileLocalSignature::new(
            Arc::new(public("Outer", None, SignatureFlags::empty())),
            3,
        )),
        Signature::ScopeLocal(ScopeLocalSignature::new(2, "local x")),
    ];
    for signature in &cases {
        let copy = signature.clone();
        assert_eq!(*signature, copy);
        assert_eq!(hash_of(signature), hash_of(&copy));
    }
}

#[test]
fn test_distinct_declarations_compare_unequal() {
    assert_ne!(
        public("Outer.f", Some(1), SignatureFlags::empty()),
        public("Outer.f", Some(2), SignatureFlags::empty())
    );
    assert_ne!(
        public("Outer.f", Some(1), SignatureFlags::empty()),
        public("Outer.g", Some(1), SignatureFlags::empty())
    );
    assert_ne!(
        public("Outer.f", Some(1), SignatureFlags::empty()),
        public("Outer.f", Some(1), SignatureFlags::IS_EXPECT)
    );
}

#[test]
fn test_accessor_equals_bare_public_with_same_fields() {
    let property = Arc::new(public("Outer.size", Some(1), SignatureFlags::empty()));
    let accessor_public = PublicSignature::new(
        "demo.pkg",
        "Outer.size.<get-size>",
        Some(9),
        SignatureFlags::empty(),
    );
    let accessor = Signature::Accessor(AccessorSignature::new(
        property,
        accessor_public.clone(),
    ));
    let bare = Signature::Public(accessor_public);

    assert_eq!(accessor, bare);
    assert_eq!(hash_of(&accessor), hash_of(&bare));

    // deduplication across accessor/property identity
    let mut set = HashSet::new();
    set.insert(accessor);
    set.insert(bare);
    assert_eq!(set.len(), 1);
}

#[test]
fn test_render_is_deterministic() {
    let signature = Signature::FileLocal(FileLocalSignature::new(
        Arc::new(public("Outer", None, SignatureFlags::IS_NATIVE_INTEROP)),
        21,
    ));
    assert_eq!(signature.render(), signature.render());
    assert_eq!(signature.render(), "demo.pkg/Outer|null[100]:21");
}

#[test]
fn test_top_level_is_idempotent() {
    let signatures = [
        public("Outer.Inner.member", Some(4), SignatureFlags::IS_EXPECT),
        public("Outer", None, SignatureFlags::empty()),
        public("", None, SignatureFlags::empty()),
        Signature::FileLocal(FileLocalSignature::new(
            Arc::new(public("", None, SignatureFlags::empty())),
            1,
        )),
        Signature::FileLocal(FileLocalSignature::new(
            Arc::new(public("Outer.Inner", None, SignatureFlags::empty())),
            2,
        )),
    ];
    for signature in &signatures {
        let top = signature.top_level_signature().unwrap();
        assert_eq!(top.top_level_signature().unwrap(), top, "for {signature}");
    }
}

#[test]
fn test_nearest_public_walks_containers() {
    let class_sig = public("Outer", None, SignatureFlags::empty());
    let nested = Signature::FileLocal(FileLocalSignature::new(
        Arc::new(Signature::FileLocal(FileLocalSignature::new(
            Arc::new(class_sig.clone()),
            5,
        ))),
        6,
    ));
    assert_eq!(nested.nearest_public_sig().unwrap(), class_sig);
    assert_eq!(class_sig.nearest_public_sig().unwrap(), class_sig);
}

#[test]
fn test_scope_local_rejects_structural_queries() {
    let local = Signature::ScopeLocal(ScopeLocalSignature::new(0, "value parameter i"));
    assert!(local.is_local());
    assert!(!local.has_top_level());
    assert_eq!(local.render(), "#0");
    assert_eq!(local.to_string(), "private #0");
    assert_eq!(
        local.top_level_signature().unwrap_err(),
        SignatureError::UnsupportedForScopeLocal {
            operation: "top_level_signature"
        }
    );
}

#[test]
fn test_public_signature_segments() {
    let public = PublicSignature::new(
        "demo.pkg",
        "Outer.Inner.member",
        None,
        SignatureFlags::empty(),
    );
    assert_eq!(public.short_name(), "member");
    assert_eq!(public.first_name_segment(), "Outer");
    assert_eq!(
        public.name_segments().collect::<Vec<_>>(),
        vec!["Outer", "Inner", "member"]
    );
}

#[test]
fn test_display_prefixes_visibility() {
    let signature = public("Outer", None, SignatureFlags::empty());
    assert_eq!(signature.to_string(), "public demo.pkg/Outer|null[0]");

    let file_local =
        Signature::FileLocal(FileLocalSignature::new(Arc::new(signature), 8));
    assert!(file_local.to_string().starts_with("private "));
}
