//! Signature composition: declarations to signatures.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::symbols::{
    ClassId, ClassKind, ConstructorId, FunctionId, PropertyId, SymbolTable, Visibility,
};

use super::mangle::{mangle_constructor, mangle_function, mangle_property, signature_id};
use super::{
    AccessorSignature, FileLocalSignature, PublicSignature, ScopeLocalSignature, Signature,
    SignatureFlags,
};

/// Reference to a declaration for signature composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationRef {
    Class(ClassId),
    Function(FunctionId),
    Property(PropertyId),
    Constructor(ConstructorId),
}

/// Property accessor selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// Composition entry point, consumed by the linker/serializer and by
/// name mangling.
pub trait SignatureComposer {
    /// `None` when the declaration has no stable identity (a local
    /// entity). Callers must handle the none case explicitly.
    fn compose_signature(&self, table: &SymbolTable, declaration: DeclarationRef)
    -> Option<Signature>;

    fn compose_enum_entry_signature(&self, table: &SymbolTable, entry: ClassId)
    -> Option<Signature>;
}

/// Default composer.
///
/// File-local and scope-local ids are handed out from per-composer
/// counters and memoized per declaration, so composing the same
/// declaration twice yields equal signatures within one composer
/// instance.
#[derive(Debug, Default)]
pub struct DefaultSignatureComposer {
    file_local_ids: RefCell<FxHashMap<DeclarationRef, i64>>,
    accessor_local_ids: RefCell<FxHashMap<(PropertyId, AccessorKind), i64>>,
    next_file_local: Cell<i64>,
    next_scope_local: Cell<i32>,
}

impl DefaultSignatureComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signature for a local variable or value parameter.
    pub fn scope_local_signature(&self, description: impl Into<Arc<str>>) -> Signature {
        let id = self.next_scope_local.get();
        self.next_scope_local.set(id + 1);
        Signature::ScopeLocal(ScopeLocalSignature::new(id, description))
    }

    /// Signature for a property accessor. `None` when the property has
    /// no stable identity or lacks the requested accessor.
    pub fn compose_accessor_signature(
        &self,
        table: &SymbolTable,
        property: PropertyId,
        kind: AccessorKind,
    ) -> Option<Signature> {
        let decl = table.property(property);
        match kind {
            AccessorKind::Getter if !decl.has_getter => return None,
            AccessorKind::Setter if !decl.has_setter => return None,
            _ => {}
        }
        let property_sig = self.compose_signature(table, DeclarationRef::Property(property))?;

        let accessor_name = match kind {
            AccessorKind::Getter => format!("<get-{}>", decl.name),
            AccessorKind::Setter => format!("<set-{}>", decl.name),
        };
        match &property_sig {
            Signature::Public(property_pub) => {
                let path = format!("{}.{}", property_pub.declaration_fq_name, accessor_name);
                let mangled = format!("{}.{}", mangle_property(table, property), accessor_name);
                let accessor = PublicSignature::new(
                    property_pub.package_fq_name.clone(),
                    path,
                    Some(signature_id(&mangled)),
                    property_pub.mask,
                );
                Some(Signature::Accessor(AccessorSignature::new(
                    Arc::new(property_sig.clone()),
                    accessor,
                )))
            }
            // Non-public property: the accessor is file-local, anchored
            // to the property's signature.
            _ => {
                let local_id = self.accessor_local_id(property, kind);
                Some(Signature::FileLocal(FileLocalSignature::new(
                    Arc::new(property_sig),
                    local_id,
                )))
            }
        }
    }

    fn file_local_id(&self, declaration: DeclarationRef) -> i64 {
        let mut ids = self.file_local_ids.borrow_mut();
        *ids.entry(declaration).or_insert_with(|| {
            let id = self.next_file_local.get();
            self.next_file_local.set(id + 1);
            id
        })
    }

    fn accessor_local_id(&self, property: PropertyId, kind: AccessorKind) -> i64 {
        let mut ids = self.accessor_local_ids.borrow_mut();
        *ids.entry((property, kind)).or_insert_with(|| {
            let id = self.next_file_local.get();
            self.next_file_local.set(id + 1);
            id
        })
    }

    /// Signature of the container a member hangs off: the owner class
    /// when there is one, the package signature otherwise.
    fn container_signature(
        &self,
        table: &SymbolTable,
        owner: Option<ClassId>,
        package: &str,
    ) -> Option<Signature> {
        match owner {
            Some(owner) => self.compose_signature(table, DeclarationRef::Class(owner)),
            None => Some(Signature::Public(PublicSignature::new(
                package,
                "",
                None,
                SignatureFlags::empty(),
            ))),
        }
    }

    fn base_flags(&self, table: &SymbolTable, is_expect: bool) -> SignatureFlags {
        let mut mask = SignatureFlags::empty();
        if is_expect {
            mask |= SignatureFlags::IS_EXPECT;
        }
        if table.native_interop_library {
            mask |= SignatureFlags::IS_NATIVE_INTEROP;
        }
        mask
    }

    /// Either a public signature continuing the container's path, or a
    /// file-local one anchored to the container.
    fn member_signature(
        &self,
        container: Signature,
        declaration: DeclarationRef,
        visibility: Visibility,
        package: &str,
        name: &str,
        id: Option<i64>,
        mask: SignatureFlags,
    ) -> Signature {
        if visibility.is_public() {
            if let Signature::Public(container_pub) = &container {
                let path = if container_pub.declaration_fq_name.is_empty() {
                    name.to_string()
                } else {
                    format!("{}.{}", container_pub.declaration_fq_name, name)
                };
                return Signature::Public(PublicSignature::new(package, path, id, mask));
            }
        }
        Signature::FileLocal(FileLocalSignature::new(
            Arc::new(container),
            self.file_local_id(declaration),
        ))
    }

    fn compose_class(&self, table: &SymbolTable, class: ClassId) -> Option<Signature> {
        let decl = table.class(class);
        if decl.visibility == Visibility::Local {
            return None;
        }
        if decl.kind == ClassKind::EnumEntry {
            return self.compose_enum_entry_signature(table, class);
        }
        let container = self.container_signature(table, decl.owner, decl.package.as_str())?;
        let sig = self.member_signature(
            container,
            DeclarationRef::Class(class),
            decl.visibility,
            decl.package.as_str(),
            decl.name.as_str(),
            None,
            self.base_flags(table, decl.is_expect),
        );
        trace!("[SIGNATURES] class {} -> {}", decl.name, sig);
        Some(sig)
    }

    fn compose_function(&self, table: &SymbolTable, function: FunctionId) -> Option<Signature> {
        let decl = table.function(function);
        if decl.visibility == Visibility::Local {
            return None;
        }
        let container = self.container_signature(table, decl.owner, decl.package.as_str())?;
        let id = signature_id(&mangle_function(table, function));
        Some(self.member_signature(
            container,
            DeclarationRef::Function(function),
            decl.visibility,
            decl.package.as_str(),
            decl.name.as_str(),
            Some(id),
            self.base_flags(table, decl.is_expect),
        ))
    }

    fn compose_property(&self, table: &SymbolTable, property: PropertyId) -> Option<Signature> {
        let decl = table.property(property);
        if decl.visibility == Visibility::Local {
            return None;
        }
        let container = self.container_signature(table, decl.owner, decl.package.as_str())?;
        let mut mask = self.base_flags(table, decl.is_expect);
        if decl.is_synthetic_override {
            mask |= SignatureFlags::IS_SYNTHETIC_OVERRIDE;
        }
        let id = signature_id(&mangle_property(table, property));
        Some(self.member_signature(
            container,
            DeclarationRef::Property(property),
            decl.visibility,
            decl.package.as_str(),
            decl.name.as_str(),
            Some(id),
            mask,
        ))
    }

    fn compose_constructor(
        &self,
        table: &SymbolTable,
        constructor: ConstructorId,
    ) -> Option<Signature> {
        let decl = table.constructor(constructor);
        let owner = table.class(decl.owner);
        let container = self.compose_signature(table, DeclarationRef::Class(decl.owner))?;
        let id = signature_id(&mangle_constructor(table, constructor));
        Some(self.member_signature(
            container,
            DeclarationRef::Constructor(constructor),
            decl.visibility,
            owner.package.as_str(),
            "<init>",
            Some(id),
            self.base_flags(table, owner.is_expect),
        ))
    }
}

impl SignatureComposer for DefaultSignatureComposer {
    fn compose_signature(
        &self,
        table: &SymbolTable,
        declaration: DeclarationRef,
    ) -> Option<Signature> {
        match declaration {
            DeclarationRef::Class(class) => self.compose_class(table, class),
            DeclarationRef::Function(function) => self.compose_function(table, function),
            DeclarationRef::Property(property) => self.compose_property(table, property),
            DeclarationRef::Constructor(constructor) => {
                self.compose_constructor(table, constructor)
            }
        }
    }

    fn compose_enum_entry_signature(
        &self,
        table: &SymbolTable,
        entry: ClassId,
    ) -> Option<Signature> {
        let decl = table.class(entry);
        if decl.kind != ClassKind::EnumEntry {
            return None;
        }
        let owner = decl.owner?;
        let container = self.compose_signature(table, DeclarationRef::Class(owner))?;
        let mangled = format!(
            "{}.{}${}",
            decl.package,
            table.class(owner).name,
            decl.name
        );
        Some(self.member_signature(
            container,
            DeclarationRef::Class(entry),
            decl.visibility,
            decl.package.as_str(),
            decl.name.as_str(),
            Some(signature_id(&mangled)),
            self.base_flags(table, decl.is_expect),
        ))
    }
}
