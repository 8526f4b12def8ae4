//! Common types and utilities for the API catalog compiler
//!
//! This crate contains the compiled catalog entities, the error taxonomy and
//! the collation used to order catalog entries. It is shared by the parser
//! and CLI components.

mod catalog;
mod collation;

pub use catalog::{Catalog, CatalogNode, Operation, Resource, Service};
pub use collation::{locale_cmp, sort_by_name};

use thiserror::Error;

/// Errors that can occur while compiling a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Shape not found: {id}")]
    ShapeNotFound { id: String },

    #[error("Type mismatch for {id}: expected {expected}, found {actual}")]
    TypeMismatch {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("Shape {id} of type {kind} cannot be used as a value")]
    NotAValue { id: String, kind: String },

    #[error("Operation {operation} has unsupported input {id} of type {kind}")]
    UnsupportedInputShape {
        operation: String,
        id: String,
        kind: String,
    },

    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_shape() {
        let err = CatalogError::ShapeNotFound {
            id: "com.example#Missing".to_string(),
        };
        assert_eq!(err.to_string(), "Shape not found: com.example#Missing");

        let err = CatalogError::TypeMismatch {
            id: "com.example#Thing".to_string(),
            expected: "operation".to_string(),
            actual: "structure".to_string(),
        };
        assert!(err.to_string().contains("com.example#Thing"));
        assert!(err.to_string().contains("expected operation"));
    }
}
