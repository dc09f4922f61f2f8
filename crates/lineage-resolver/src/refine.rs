//! Type reference refinement
//!
//! Replaces `Variable` leaves with their bindings at one hierarchy level while
//! rebuilding every composite around them with exactly the same shape.

use crate::error::{ResolveError, ResolveResult};
use crate::substitution::LevelBindings;
use indexmap::IndexSet;
use lineage_types::{TypeRef, Wildcard};
use tracing::trace;

/// Refine `ty` against the bindings of one level.
///
/// Fails with [`ResolveError::UnsolvableGeneric`] when a variable has no binding
/// and with [`ResolveError::ArrayOfGenericType`] when an array component cannot
/// be expressed as either a concrete array or a generic array.
pub fn refine(ty: &TypeRef, bindings: &LevelBindings) -> ResolveResult<TypeRef> {
    match ty {
        TypeRef::Concrete(_) => Ok(ty.clone()),
        TypeRef::Variable(name) => {
            let bound = bindings
                .get(name)
                .cloned()
                .ok_or_else(|| ResolveError::UnsolvableGeneric {
                    variable: name.to_string(),
                    declaration: bindings.declaration().to_string(),
                })?;
            trace!(variable = %name, binding = %bound, "substituted generic");
            Ok(bound)
        }
        TypeRef::Parameterized { raw, args, owner } => Ok(TypeRef::Parameterized {
            raw: raw.clone(),
            args: args
                .iter()
                .map(|arg| refine(arg, bindings))
                .collect::<ResolveResult<Vec<_>>>()?,
            owner: owner.clone(),
        }),
        TypeRef::GenericArray(_) => refine_array(ty, bindings),
        TypeRef::Wildcard(wildcard) => Ok(TypeRef::Wildcard(Wildcard {
            upper_bounds: refine_bounds(&wildcard.upper_bounds, bindings)?,
            lower_bounds: refine_bounds(&wildcard.lower_bounds, bindings)?,
        })),
    }
}

fn refine_array(array: &TypeRef, bindings: &LevelBindings) -> ResolveResult<TypeRef> {
    let (component, dimensions) = array.flatten_array();

    match refine(component, bindings)? {
        TypeRef::Concrete(name) => Ok(TypeRef::concrete_array(&name, dimensions)),
        // A composite component has no single array class; keep the wrappers.
        composite @ (TypeRef::Parameterized { .. } | TypeRef::GenericArray(_)) => {
            Ok(TypeRef::nested_generic_array(composite, dimensions))
        }
        other @ (TypeRef::Variable(_) | TypeRef::Wildcard(_)) => {
            Err(ResolveError::ArrayOfGenericType {
                component: other.to_string(),
                declaration: bindings.declaration().to_string(),
            })
        }
    }
}

fn refine_bounds(
    bounds: &IndexSet<TypeRef>,
    bindings: &LevelBindings,
) -> ResolveResult<IndexSet<TypeRef>> {
    bounds.iter().map(|bound| refine(bound, bindings)).collect()
}
