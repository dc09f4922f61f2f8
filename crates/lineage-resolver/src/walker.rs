//! Hierarchy walk from a leaf declaration up to an ancestor
//!
//! Concrete type information originates at the leaf, so every level computes
//! the bindings it hands to its supertype before the walk moves one level up.

use crate::error::{ResolveError, ResolveResult};
use crate::substitution::{LevelBindings, SubstitutionTable};
use lineage_metadata::{DeclId, TypeMetadataProvider};
use lineage_types::TypeRef;
use tracing::{debug, trace};

pub(crate) struct HierarchyWalker<'a, P: TypeMetadataProvider + ?Sized> {
    provider: &'a P,
    leaf: DeclId,
    ancestor: DeclId,
    index: usize,
    max_depth: usize,
}

impl<'a, P: TypeMetadataProvider + ?Sized> HierarchyWalker<'a, P> {
    pub(crate) fn new(
        provider: &'a P,
        leaf: DeclId,
        ancestor: DeclId,
        index: usize,
        max_depth: usize,
    ) -> Self {
        Self {
            provider,
            leaf,
            ancestor,
            index,
            max_depth,
        }
    }

    /// Walk from the leaf and return what the level below the ancestor bound
    /// to the requested slot, or `None` if nothing was bound.
    pub(crate) fn run(&self) -> ResolveResult<Option<TypeRef>> {
        self.walk(self.leaf, None, 0)
    }

    fn walk(
        &self,
        current: DeclId,
        inherited: Option<&SubstitutionTable>,
        depth: usize,
    ) -> ResolveResult<Option<TypeRef>> {
        if depth >= self.max_depth {
            return Err(ResolveError::DepthLimitExceeded {
                leaf: self.name_of(self.leaf)?,
                ancestor: self.name_of(self.ancestor)?,
                limit: self.max_depth,
            });
        }

        let name = self.provider.name(current)?;
        debug!(level = name, depth, "visiting hierarchy level");

        // The ancestor never substitutes into its own slots.
        if current == self.ancestor {
            return Ok(inherited.and_then(|table| table.get(self.index)).cloned());
        }

        let level = LevelBindings::new(name, self.provider.declared_slots(current)?, inherited);
        let outgoing =
            SubstitutionTable::from_super_type(self.provider.super_type_reference(current)?, &level)?;
        for (position, binding) in outgoing.iter().enumerate() {
            trace!(level = name, position, binding = %binding, "bound supertype argument");
        }

        match self.provider.super_declaration(current)? {
            Some(parent) => self.walk(parent, Some(&outgoing), depth + 1),
            None => Err(ResolveError::AncestorNotFound {
                ancestor: self.name_of(self.ancestor)?,
                leaf: self.name_of(self.leaf)?,
            }),
        }
    }

    fn name_of(&self, decl: DeclId) -> ResolveResult<String> {
        Ok(self.provider.name(decl)?.to_string())
    }
}
