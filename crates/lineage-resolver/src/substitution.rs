//! Per-level substitution tables
//!
//! Two tables exist at every hierarchy level:
//! - [`LevelBindings`]: the level's own slots, by name, bound to what the level
//!   below supplied for them.
//! - [`SubstitutionTable`]: the level's supertype arguments after refinement,
//!   by position. This is what the next level up receives.

use crate::error::ResolveResult;
use crate::refine::refine;
use lineage_types::TypeRef;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// Bindings of one declaration's slots, keyed by slot name
#[derive(Debug, Clone, PartialEq)]
pub struct LevelBindings {
    declaration: SmolStr,
    bindings: FxHashMap<SmolStr, TypeRef>,
}

impl LevelBindings {
    /// Bind each slot to the inherited entry at the same position.
    ///
    /// Slots without an inherited entry (the first level of a walk, or a level
    /// extended without type arguments) stay bound to themselves.
    pub fn new(
        declaration: impl Into<SmolStr>,
        slots: &[SmolStr],
        inherited: Option<&SubstitutionTable>,
    ) -> Self {
        let bindings = slots
            .iter()
            .enumerate()
            .map(|(position, slot)| {
                let binding = inherited
                    .and_then(|table| table.get(position))
                    .cloned()
                    .unwrap_or_else(|| TypeRef::Variable(slot.clone()));
                (slot.clone(), binding)
            })
            .collect();

        Self {
            declaration: declaration.into(),
            bindings,
        }
    }

    /// Build bindings from explicit `(slot, binding)` pairs
    pub fn from_pairs<S: Into<SmolStr>>(
        declaration: impl Into<SmolStr>,
        pairs: impl IntoIterator<Item = (S, TypeRef)>,
    ) -> Self {
        Self {
            declaration: declaration.into(),
            bindings: pairs
                .into_iter()
                .map(|(slot, binding)| (slot.into(), binding))
                .collect(),
        }
    }

    /// Name of the declaration these bindings belong to
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    pub fn get(&self, slot: &str) -> Option<&TypeRef> {
        self.bindings.get(slot)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Refined supertype arguments of one level, keyed by position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstitutionTable {
    bindings: Vec<TypeRef>,
}

impl SubstitutionTable {
    pub fn new(bindings: Vec<TypeRef>) -> Self {
        Self { bindings }
    }

    /// Refine each argument of a parameterized supertype against `level`.
    ///
    /// Any other supertype (none, or a raw extension) passes nothing upward.
    pub fn from_super_type(super_type: Option<&TypeRef>, level: &LevelBindings) -> ResolveResult<Self> {
        let bindings = match super_type {
            Some(TypeRef::Parameterized { args, .. }) => args
                .iter()
                .map(|arg| refine(arg, level))
                .collect::<ResolveResult<Vec<_>>>()?,
            _ => Vec::new(),
        };
        Ok(Self { bindings })
    }

    pub fn get(&self, position: usize) -> Option<&TypeRef> {
        self.bindings.get(position)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.bindings.iter()
    }
}
