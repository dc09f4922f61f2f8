//! Hand-built declaration tables
//!
//! A [`DeclarationTable`] stands in for runtime reflection: every declaration is
//! registered up front, links between declarations are resolved once, and the
//! table is validated before anyone can query it.

use crate::declaration::{TypeDeclaration, TypeMetadataProvider};
use crate::error::{MetadataError, MetadataResult};
use crate::DeclId;
use lineage_types::TypeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::debug;

/// Unvalidated description of one declaration, as written by hand or in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarationSpec {
    pub name: SmolStr,
    #[serde(default)]
    pub slots: Vec<SmolStr>,
    #[serde(default)]
    pub extends: Option<TypeRef>,
}

impl DeclarationSpec {
    pub fn new<S: Into<SmolStr>>(
        name: impl Into<SmolStr>,
        slots: impl IntoIterator<Item = S>,
        extends: Option<TypeRef>,
    ) -> Self {
        Self {
            name: name.into(),
            slots: slots.into_iter().map(Into::into).collect(),
            extends,
        }
    }
}

/// Collects declarations in any order and validates them as a whole
#[derive(Debug, Clone, Default)]
pub struct DeclarationTableBuilder {
    specs: Vec<DeclarationSpec>,
}

impl DeclarationTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration and return the id it will have in the built table.
    ///
    /// Supertypes may refer to declarations registered later.
    pub fn declare<S: Into<SmolStr>>(
        &mut self,
        name: impl Into<SmolStr>,
        slots: impl IntoIterator<Item = S>,
        extends: Option<TypeRef>,
    ) -> DeclId {
        self.add(DeclarationSpec::new(name, slots, extends))
    }

    pub fn add(&mut self, spec: DeclarationSpec) -> DeclId {
        let id = DeclId(self.specs.len());
        self.specs.push(spec);
        id
    }

    /// Validate every declaration and freeze the table
    pub fn build(self) -> MetadataResult<DeclarationTable> {
        let mut by_name = FxHashMap::default();
        for (index, spec) in self.specs.iter().enumerate() {
            if by_name.insert(spec.name.clone(), DeclId(index)).is_some() {
                return Err(MetadataError::DuplicateDeclaration(spec.name.to_string()));
            }
        }

        for spec in &self.specs {
            check_slots(spec)?;
        }

        let mut declarations = Vec::with_capacity(self.specs.len());
        for spec in self.specs {
            let super_decl = match &spec.extends {
                Some(super_type) => Some(link_super_type(&spec.name, super_type, &by_name)?),
                None => None,
            };
            declarations.push(TypeDeclaration {
                name: spec.name,
                slots: spec.slots,
                super_type: spec.extends,
                super_decl,
            });
        }

        let table = DeclarationTable {
            declarations,
            by_name,
        };
        table.check_arities()?;
        table.check_acyclic()?;

        debug!(declarations = table.len(), "built declaration table");
        Ok(table)
    }
}

// Slots are bound by name at every level, so they must be distinct, and a
// supertype may only refer to the declaring type's own slots.
fn check_slots(spec: &DeclarationSpec) -> MetadataResult<()> {
    let mut seen = FxHashSet::default();
    for slot in &spec.slots {
        if !seen.insert(slot) {
            return Err(MetadataError::DuplicateSlot {
                declaration: spec.name.to_string(),
                slot: slot.to_string(),
            });
        }
    }

    let Some(super_type) = &spec.extends else {
        return Ok(());
    };
    match super_type
        .free_variables()
        .into_iter()
        .find(|variable| !seen.contains(variable))
    {
        Some(variable) => Err(MetadataError::UnknownSlot {
            declaration: spec.name.to_string(),
            variable: variable.to_string(),
        }),
        None => Ok(()),
    }
}

fn link_super_type(
    declaration: &str,
    super_type: &TypeRef,
    by_name: &FxHashMap<SmolStr, DeclId>,
) -> MetadataResult<DeclId> {
    let raw = super_type
        .raw_name()
        .ok_or_else(|| MetadataError::InvalidSuperType {
            declaration: declaration.to_string(),
            super_type: super_type.to_string(),
        })?;
    by_name
        .get(raw)
        .copied()
        .ok_or_else(|| MetadataError::UnknownDeclaration {
            declaration: declaration.to_string(),
            super_type: raw.to_string(),
        })
}

/// Immutable set of declarations indexed by id and by name
#[derive(Debug, Clone)]
pub struct DeclarationTable {
    declarations: Vec<TypeDeclaration>,
    by_name: FxHashMap<SmolStr, DeclId>,
}

impl DeclarationTable {
    pub fn builder() -> DeclarationTableBuilder {
        DeclarationTableBuilder::new()
    }

    pub fn from_specs(specs: impl IntoIterator<Item = DeclarationSpec>) -> MetadataResult<Self> {
        let mut builder = DeclarationTableBuilder::new();
        for spec in specs {
            builder.add(spec);
        }
        builder.build()
    }

    /// Load a table from a JSON array of declaration specs.
    ///
    /// ```
    /// use lineage_metadata::{DeclarationTable, TypeMetadataProvider};
    ///
    /// let table = DeclarationTable::from_json(r#"[
    ///     { "name": "Base", "slots": ["T"] },
    ///     { "name": "Leaf", "extends": { "Parameterized": {
    ///         "raw": "Base", "args": [{ "Concrete": "String" }], "owner": null } } }
    /// ]"#).unwrap();
    /// let leaf = table.lookup("Leaf").unwrap();
    /// assert_eq!(table.super_declaration(leaf).unwrap(), table.lookup("Base"));
    /// ```
    pub fn from_json(json: &str) -> MetadataResult<Self> {
        let specs: Vec<DeclarationSpec> = serde_json::from_str(json)?;
        Self::from_specs(specs)
    }

    pub fn get(&self, id: DeclId) -> Option<&TypeDeclaration> {
        self.declarations.get(id.0)
    }

    pub fn declaration(&self, id: DeclId) -> MetadataResult<&TypeDeclaration> {
        self.get(id).ok_or(MetadataError::UnknownId(id))
    }

    /// Find a declaration by its name
    pub fn lookup(&self, name: &str) -> Option<DeclId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &TypeDeclaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(index, decl)| (DeclId(index), decl))
    }

    fn check_arities(&self) -> MetadataResult<()> {
        for decl in &self.declarations {
            if let Some(super_type) = &decl.super_type {
                self.check_arity(&decl.name, super_type)?;
            }
        }
        Ok(())
    }

    // Only references to registered declarations are checked; foreign types
    // such as `List` have no arity to compare against.
    fn check_arity(&self, declaration: &str, ty: &TypeRef) -> MetadataResult<()> {
        match ty {
            TypeRef::Concrete(_) | TypeRef::Variable(_) => Ok(()),
            TypeRef::Parameterized { raw, args, owner } => {
                if let Some(target) = self.by_name.get(raw).and_then(|&id| self.get(id)) {
                    if target.arity() != args.len() {
                        return Err(MetadataError::ArityMismatch {
                            declaration: declaration.to_string(),
                            reference: ty.to_string(),
                            raw: raw.to_string(),
                            expected: target.arity(),
                            found: args.len(),
                        });
                    }
                }
                if let Some(owner) = owner {
                    self.check_arity(declaration, owner)?;
                }
                args.iter()
                    .try_for_each(|arg| self.check_arity(declaration, arg))
            }
            TypeRef::GenericArray(component) => self.check_arity(declaration, component),
            TypeRef::Wildcard(wildcard) => wildcard
                .upper_bounds
                .iter()
                .chain(&wildcard.lower_bounds)
                .try_for_each(|bound| self.check_arity(declaration, bound)),
        }
    }

    fn check_acyclic(&self) -> MetadataResult<()> {
        let mut acyclic: FxHashSet<DeclId> = FxHashSet::default();

        for (start, _) in self.iter() {
            let mut path = Vec::new();
            let mut current = Some(start);

            while let Some(id) = current {
                if acyclic.contains(&id) {
                    break;
                }
                if let Some(position) = path.iter().position(|&seen| seen == id) {
                    let cycle = path[position..]
                        .iter()
                        .chain(std::iter::once(&id))
                        .filter_map(|&seen| self.get(seen))
                        .map(|decl| decl.name.to_string())
                        .collect();
                    return Err(MetadataError::InheritanceCycle(cycle));
                }
                path.push(id);
                current = self.get(id).and_then(|decl| decl.super_decl);
            }

            acyclic.extend(path);
        }

        Ok(())
    }
}

impl TypeMetadataProvider for DeclarationTable {
    fn name(&self, decl: DeclId) -> MetadataResult<&str> {
        Ok(self.declaration(decl)?.name())
    }

    fn declared_slots(&self, decl: DeclId) -> MetadataResult<&[SmolStr]> {
        Ok(self.declaration(decl)?.slots())
    }

    fn super_type_reference(&self, decl: DeclId) -> MetadataResult<Option<&TypeRef>> {
        Ok(self.declaration(decl)?.super_type())
    }

    fn super_declaration(&self, decl: DeclId) -> MetadataResult<Option<DeclId>> {
        Ok(self.declaration(decl)?.super_decl())
    }

    fn lookup(&self, name: &str) -> Option<DeclId> {
        DeclarationTable::lookup(self, name)
    }
}
