//! Lineage Declaration Metadata
//!
//! Provides the declaration side of generic resolution: what generic slots a
//! type declares and what it extends.
//!
//! The resolver only ever talks to a [`TypeMetadataProvider`]. This crate ships
//! one implementation, [`DeclarationTable`], which is either built by hand with
//! [`DeclarationTableBuilder`] or loaded from JSON.

pub mod declaration;
pub mod error;
pub mod table;

pub use declaration::{TypeDeclaration, TypeMetadataProvider};
pub use error::{MetadataError, MetadataResult};
pub use table::{DeclarationSpec, DeclarationTable, DeclarationTableBuilder};

use serde::{Deserialize, Serialize};

/// Unique identifier for a declaration within one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(pub usize);
