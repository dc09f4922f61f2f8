//! Lineage Type References
//!
//! The type model shared by the declaration table and the resolver.
//!
//! A [`TypeRef`] describes a type as it appears at some point in an
//! inheritance chain: either fully concrete, a generic slot that is still
//! unbound (`Variable`), or a composite built from other references
//! (parameterized instantiations, generic arrays and wildcards).
//!
//! ```
//! use lineage_types::TypeRef;
//!
//! let list = TypeRef::parameterized("List", vec![TypeRef::concrete("String")]);
//! assert_eq!(list.to_string(), "List<String>");
//! assert!(list.is_defined());
//! ```

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Suffix appended to a concrete name once per array dimension.
pub const ARRAY_SUFFIX: &str = "[]";

// ============================================================================
// Type References
// ============================================================================

/// A reference to a type, relative to the declaration it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    /// A fully resolved, non-generic type. Concrete array classes carry one
    /// `[]` suffix per dimension (`String[]`, `Integer[][]`).
    Concrete(SmolStr),

    /// An unbound generic slot, meaningful only relative to the declaration
    /// that introduced it.
    Variable(SmolStr),

    /// A generic instantiation such as `List<String>`.
    Parameterized {
        raw: SmolStr,
        args: Vec<TypeRef>,
        owner: Option<Box<TypeRef>>,
    },

    /// An array whose component type may itself be generic.
    GenericArray(Box<TypeRef>),

    /// `?`, `? extends U` or `? super L`.
    Wildcard(Wildcard),
}

impl TypeRef {
    pub fn concrete(name: impl Into<SmolStr>) -> Self {
        TypeRef::Concrete(name.into())
    }

    pub fn variable(name: impl Into<SmolStr>) -> Self {
        TypeRef::Variable(name.into())
    }

    pub fn parameterized(raw: impl Into<SmolStr>, args: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized {
            raw: raw.into(),
            args,
            owner: None,
        }
    }

    /// A parameterized type nested inside `owner` (e.g. `Outer.Inner<T>`).
    pub fn parameterized_in(owner: TypeRef, raw: impl Into<SmolStr>, args: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized {
            raw: raw.into(),
            args,
            owner: Some(Box::new(owner)),
        }
    }

    pub fn generic_array(component: TypeRef) -> Self {
        TypeRef::GenericArray(Box::new(component))
    }

    /// Concrete array class of `component` with `dimensions` levels.
    ///
    /// `concrete_array("String", 2)` is the concrete type `String[][]`.
    pub fn concrete_array(component: &str, dimensions: usize) -> Self {
        let mut name = String::with_capacity(component.len() + dimensions * ARRAY_SUFFIX.len());
        name.push_str(component);
        for _ in 0..dimensions {
            name.push_str(ARRAY_SUFFIX);
        }
        TypeRef::Concrete(name.into())
    }

    /// Wrap `component` in `dimensions` nested generic arrays.
    pub fn nested_generic_array(component: TypeRef, dimensions: usize) -> Self {
        (0..dimensions).fold(component, |inner, _| TypeRef::generic_array(inner))
    }

    /// The unbounded wildcard `?`.
    pub fn wildcard() -> Self {
        TypeRef::Wildcard(Wildcard::unbounded())
    }

    /// `? extends bound`
    pub fn wildcard_extends(bound: TypeRef) -> Self {
        TypeRef::Wildcard(Wildcard::extends([bound]))
    }

    /// `? super bound`
    pub fn wildcard_super(bound: TypeRef) -> Self {
        TypeRef::Wildcard(Wildcard::super_of([bound]))
    }

    /// Check whether every `Variable` in the type arguments has been replaced.
    ///
    /// The enclosing type of a parameterized reference is not inspected.
    pub fn is_defined(&self) -> bool {
        match self {
            TypeRef::Concrete(_) => true,
            TypeRef::Variable(_) => false,
            TypeRef::Parameterized { args, .. } => args.iter().all(TypeRef::is_defined),
            TypeRef::GenericArray(component) => component.is_defined(),
            TypeRef::Wildcard(wildcard) => wildcard.is_defined(),
        }
    }

    /// Collect the names of all unbound variables in the type arguments, in
    /// first-seen order.
    pub fn free_variables(&self) -> Vec<SmolStr> {
        let mut found = IndexSet::new();
        self.collect_variables(&mut found);
        found.into_iter().collect()
    }

    fn collect_variables(&self, found: &mut IndexSet<SmolStr>) {
        match self {
            TypeRef::Concrete(_) => {}
            TypeRef::Variable(name) => {
                found.insert(name.clone());
            }
            TypeRef::Parameterized { args, .. } => {
                for arg in args {
                    arg.collect_variables(found);
                }
            }
            TypeRef::GenericArray(component) => component.collect_variables(found),
            TypeRef::Wildcard(wildcard) => {
                for bound in wildcard.upper_bounds.iter().chain(&wildcard.lower_bounds) {
                    bound.collect_variables(found);
                }
            }
        }
    }

    /// Collapse nested generic arrays into the innermost non-array component
    /// and the number of array levels around it.
    ///
    /// A reference that is not a generic array yields itself with zero dimensions.
    pub fn flatten_array(&self) -> (&TypeRef, usize) {
        let mut current = self;
        let mut dimensions = 0;
        while let TypeRef::GenericArray(component) = current {
            current = &**component;
            dimensions += 1;
        }
        (current, dimensions)
    }

    /// Name of the declaration this reference instantiates, if it has exactly one.
    ///
    /// Concrete array classes, generic arrays, wildcards and variables have none.
    pub fn raw_name(&self) -> Option<&str> {
        match self {
            TypeRef::Concrete(name) if !name.ends_with(ARRAY_SUFFIX) => Some(name.as_str()),
            TypeRef::Parameterized { raw, .. } => Some(raw.as_str()),
            _ => None,
        }
    }

    /// Type arguments of a parameterized reference; empty for everything else.
    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Parameterized { args, .. } => args,
            _ => &[],
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Concrete(name) | TypeRef::Variable(name) => write!(f, "{}", name),
            TypeRef::Parameterized { raw, args, owner } => {
                if let Some(owner) = owner {
                    write!(f, "{}.", owner)?;
                }
                write!(f, "{}", raw)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    write_joined(f, args, ", ")?;
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeRef::GenericArray(component) => write!(f, "{}{}", component, ARRAY_SUFFIX),
            TypeRef::Wildcard(wildcard) => write!(f, "{}", wildcard),
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a TypeRef>,
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

// ============================================================================
// Wildcards
// ============================================================================

/// Bounds of a wildcard type argument.
///
/// Both bound sets keep insertion order for display; equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wildcard {
    #[serde(default)]
    pub upper_bounds: IndexSet<TypeRef>,
    #[serde(default)]
    pub lower_bounds: IndexSet<TypeRef>,
}

impl Wildcard {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn extends(bounds: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            upper_bounds: bounds.into_iter().collect(),
            lower_bounds: IndexSet::new(),
        }
    }

    pub fn super_of(bounds: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            upper_bounds: IndexSet::new(),
            lower_bounds: bounds.into_iter().collect(),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.upper_bounds
            .iter()
            .chain(&self.lower_bounds)
            .all(TypeRef::is_defined)
    }
}

// Set equality is order-independent, so only the set sizes take part in the hash.
impl Hash for Wildcard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.upper_bounds.len().hash(state);
        self.lower_bounds.len().hash(state);
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?")?;
        if !self.lower_bounds.is_empty() {
            write!(f, " super ")?;
            write_joined(f, &self.lower_bounds, " & ")
        } else if !self.upper_bounds.is_empty() {
            write!(f, " extends ")?;
            write_joined(f, &self.upper_bounds, " & ")
        } else {
            Ok(())
        }
    }
}
