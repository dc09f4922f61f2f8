//! Declaration metadata errors

use crate::DeclId;
use thiserror::Error;

/// Result type for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors raised while building, loading or querying declaration metadata
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Two declarations share a name
    #[error("duplicate declaration '{0}'")]
    DuplicateDeclaration(String),

    /// A declaration lists the same slot name twice
    #[error("declaration '{declaration}' declares slot '{slot}' more than once")]
    DuplicateSlot { declaration: String, slot: String },

    /// A supertype refers to a variable that is not one of the declaration's slots
    #[error("supertype of '{declaration}' uses '{variable}', which is not one of its generic slots")]
    UnknownSlot {
        declaration: String,
        variable: String,
    },

    /// A supertype names a declaration that was never registered
    #[error("declaration '{declaration}' extends unknown type '{super_type}'")]
    UnknownDeclaration {
        declaration: String,
        super_type: String,
    },

    /// A supertype is neither a concrete nor a parameterized type
    #[error("declaration '{declaration}' has invalid supertype '{super_type}'")]
    InvalidSuperType {
        declaration: String,
        super_type: String,
    },

    /// A parameterized reference supplies the wrong number of type arguments
    #[error("'{reference}' in declaration '{declaration}' supplies {found} type argument(s), but '{raw}' declares {expected}")]
    ArityMismatch {
        declaration: String,
        reference: String,
        raw: String,
        expected: usize,
        found: usize,
    },

    /// A supertype chain loops back on itself
    #[error("inheritance cycle detected: {}", .0.join(" -> "))]
    InheritanceCycle(Vec<String>),

    /// A declaration id does not belong to this provider
    #[error("unknown declaration id {0:?}")]
    UnknownId(DeclId),

    /// No declaration is registered under the given name
    #[error("declaration '{0}' has not been found")]
    DeclarationNotFound(String),

    /// A JSON declaration table could not be parsed
    #[error("invalid declaration table: {0}")]
    Json(#[from] serde_json::Error),
}
