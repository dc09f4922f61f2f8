//! Lineage Generic Parameter Resolver
//!
//! Given a leaf declaration, one of its ancestors and the index of a generic
//! slot declared by that ancestor, find the type the leaf's hierarchy binds to
//! that slot.
//!
//! ```text
//! Base<I, E, F>
//! Mid<F> extends Base<String, Boolean, F>
//! Leaf extends Mid<Integer>
//! ```
//!
//! Resolving `Base` index 2 from `Leaf` walks `Leaf -> Mid -> Base`, carrying
//! `Integer` into `Mid`'s slot `F` and from there into `Base`'s slot `F`.
//!
//! ## Resolution
//!
//! 1. **Validation**: the ancestor must declare the requested slot.
//! 2. **Walk**: one step per hierarchy level, from the leaf upward. Each level
//!    binds its own slots to what the level below supplied, then refines its
//!    supertype's arguments with those bindings (see [`refine`]).
//! 3. **Acceptance**: the binding found at the ancestor must be fully defined;
//!    a slot that is still generic when the walk ends is an error, never a
//!    partial result.
//!
//! Resolution is synchronous and keeps no state between calls, so one
//! provider can serve any number of threads.

pub mod config;
pub mod error;
pub mod refine;
pub mod substitution;
mod walker;

pub use config::ResolverConfig;
pub use error::{ResolveError, ResolveResult};
pub use refine::refine;
pub use substitution::{LevelBindings, SubstitutionTable};

pub use lineage_metadata::{DeclId, TypeMetadataProvider};
pub use lineage_types::TypeRef;

use lineage_metadata::MetadataError;
use tracing::debug;
use walker::HierarchyWalker;

/// Resolves generic parameters of ancestors over a metadata provider
#[derive(Debug)]
pub struct TypeResolver<'a, P: TypeMetadataProvider + ?Sized> {
    provider: &'a P,
    config: ResolverConfig,
}

impl<'a, P: TypeMetadataProvider + ?Sized> TypeResolver<'a, P> {
    /// Create a resolver with the default configuration
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            config: ResolverConfig::default(),
        }
    }

    /// Create a resolver with a validated configuration
    pub fn with_config(provider: &'a P, config: ResolverConfig) -> ResolveResult<Self> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn provider(&self) -> &'a P {
        self.provider
    }

    /// Resolve the type bound to slot `index` of `ancestor`, as seen from `leaf`.
    ///
    /// The result never contains an unbound `Variable`.
    pub fn resolve_parameter(
        &self,
        leaf: DeclId,
        ancestor: DeclId,
        index: usize,
    ) -> ResolveResult<TypeRef> {
        let ancestor_name = self.provider.name(ancestor)?;
        let slots = self.provider.declared_slots(ancestor)?;
        if slots.is_empty() {
            return Err(ResolveError::NoGenericParameters {
                ancestor: ancestor_name.to_string(),
            });
        }
        let Some(slot) = slots.get(index) else {
            return Err(ResolveError::IndexOutOfRange {
                ancestor: ancestor_name.to_string(),
                index,
                slot_count: slots.len(),
            });
        };

        let leaf_name = self.provider.name(leaf)?;
        debug!(leaf = leaf_name, ancestor = ancestor_name, index, "resolving generic parameter");

        let walker = HierarchyWalker::new(self.provider, leaf, ancestor, index, self.config.max_depth);
        let resolved = walker
            .run()?
            .unwrap_or_else(|| TypeRef::Variable(slot.clone()));

        if !resolved.is_defined() {
            return Err(ResolveError::UnresolvedParameter {
                parameter: slot.to_string(),
                index,
                ancestor: ancestor_name.to_string(),
                leaf: leaf_name.to_string(),
                resolved: resolved.to_string(),
            });
        }

        debug!(leaf = leaf_name, ancestor = ancestor_name, index, resolved = %resolved, "resolved generic parameter");
        Ok(resolved)
    }

    /// Resolve a parameter and find the declaration of the resolved type.
    ///
    /// Works for concrete and parameterized results; arrays and wildcards have
    /// no single declaration behind them.
    pub fn resolve_parameter_declaration(
        &self,
        leaf: DeclId,
        ancestor: DeclId,
        index: usize,
    ) -> ResolveResult<DeclId> {
        let resolved = self.resolve_parameter(leaf, ancestor, index)?;
        let raw = resolved
            .raw_name()
            .ok_or_else(|| ResolveError::NoRawDeclaration {
                resolved: resolved.to_string(),
            })?;
        self.provider
            .lookup(raw)
            .ok_or_else(|| MetadataError::DeclarationNotFound(raw.to_string()).into())
    }
}

/// Resolve with the default configuration.
///
/// Shorthand for `TypeResolver::new(provider).resolve_parameter(leaf, ancestor, index)`.
pub fn resolve_parameter<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    leaf: DeclId,
    ancestor: DeclId,
    index: usize,
) -> ResolveResult<TypeRef> {
    TypeResolver::new(provider).resolve_parameter(leaf, ancestor, index)
}
