//! Resolution errors

use lineage_metadata::MetadataError;
use thiserror::Error;

/// Result type for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur while resolving a generic parameter
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The ancestor declares no generic slots at all
    #[error("type '{ancestor}' has no generic parameters")]
    NoGenericParameters { ancestor: String },

    /// The requested slot index is outside the ancestor's slots
    #[error("type '{ancestor}' has generic parameters with index in [0, {slot_count}), but index {index} was requested")]
    IndexOutOfRange {
        ancestor: String,
        index: usize,
        slot_count: usize,
    },

    /// Walking up from the leaf never reached the ancestor
    #[error("type '{ancestor}' not found in the supertype hierarchy of '{leaf}'")]
    AncestorNotFound { ancestor: String, leaf: String },

    /// The leaf's hierarchy never bound the slot to a concrete type
    #[error("parameter '{parameter}' with index {index} declared on '{ancestor}' has not been bound by '{leaf}' (resolved to '{resolved}')")]
    UnresolvedParameter {
        parameter: String,
        index: usize,
        ancestor: String,
        leaf: String,
        resolved: String,
    },

    /// A variable in a supertype specification has no binding at its level
    #[error("generic '{variable}' used by '{declaration}' has no binding")]
    UnsolvableGeneric {
        variable: String,
        declaration: String,
    },

    /// An array component resolved to something no array type can hold
    #[error("array in the supertype of '{declaration}' can't have generic component '{component}'")]
    ArrayOfGenericType {
        component: String,
        declaration: String,
    },

    /// The walk went deeper than the configured limit
    #[error("hierarchy of '{leaf}' exceeds the maximum depth of {limit} while looking for '{ancestor}'")]
    DepthLimitExceeded {
        leaf: String,
        ancestor: String,
        limit: usize,
    },

    /// A resolved type has no single declaration behind it
    #[error("resolved type '{resolved}' has no raw declaration")]
    NoRawDeclaration { resolved: String },

    /// Resolver configuration is unusable
    #[error("invalid resolver configuration: {0}")]
    InvalidConfig(String),

    /// Declaration metadata could not be read
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_reports_range() {
        let err = ResolveError::IndexOutOfRange {
            ancestor: "Base".to_string(),
            index: 3,
            slot_count: 3,
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"type 'Base' has generic parameters with index in [0, 3), but index 3 was requested"
        );
    }

    #[test]
    fn test_unresolved_parameter_names_everything() {
        let err = ResolveError::UnresolvedParameter {
            parameter: "F".to_string(),
            index: 2,
            ancestor: "Base".to_string(),
            leaf: "BaseB".to_string(),
            resolved: "T".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'F'"));
        assert!(msg.contains("index 2"));
        assert!(msg.contains("'Base'"));
        assert!(msg.contains("'BaseB'"));
    }

    #[test]
    fn test_metadata_error_is_transparent() {
        let err: ResolveError = MetadataError::DeclarationNotFound("Teacher".to_string()).into();
        assert_eq!(err.to_string(), "declaration 'Teacher' has not been found");
    }
}
