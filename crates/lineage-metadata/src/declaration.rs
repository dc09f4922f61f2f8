//! Type declarations and the provider interface over them

use crate::error::MetadataResult;
use crate::DeclId;
use lineage_types::TypeRef;
use smol_str::SmolStr;

/// A named type with its generic slots and immediate supertype.
///
/// Declarations are immutable once they are part of a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub(crate) name: SmolStr,
    pub(crate) slots: Vec<SmolStr>,
    pub(crate) super_type: Option<TypeRef>,
    pub(crate) super_decl: Option<DeclId>,
}

impl TypeDeclaration {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared generic slots, in declaration order
    pub fn slots(&self) -> &[SmolStr] {
        &self.slots
    }

    /// Number of declared generic slots
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    /// Immediate supertype, expressed in terms of this declaration's own slots
    pub fn super_type(&self) -> Option<&TypeRef> {
        self.super_type.as_ref()
    }

    /// Declaration one level up the hierarchy
    pub fn super_decl(&self) -> Option<DeclId> {
        self.super_decl
    }
}

/// Read-only access to declaration metadata.
///
/// Implementations must be safe to share between threads; the resolver never
/// mutates a provider.
pub trait TypeMetadataProvider: Sync {
    /// Name of a declaration
    fn name(&self, decl: DeclId) -> MetadataResult<&str>;

    /// Declared generic slots, in declaration order
    fn declared_slots(&self, decl: DeclId) -> MetadataResult<&[SmolStr]>;

    /// Number of declared generic slots
    fn declared_slot_count(&self, decl: DeclId) -> MetadataResult<usize> {
        Ok(self.declared_slots(decl)?.len())
    }

    /// Immediate supertype, possibly parameterized over the declaration's own slots
    fn super_type_reference(&self, decl: DeclId) -> MetadataResult<Option<&TypeRef>>;

    /// Declaration one level up the hierarchy
    fn super_declaration(&self, decl: DeclId) -> MetadataResult<Option<DeclId>>;

    /// Find a declaration by name
    fn lookup(&self, name: &str) -> Option<DeclId>;
}
