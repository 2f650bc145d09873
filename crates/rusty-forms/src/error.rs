// File: src/error.rs
// Purpose: Error types for schema construction and mutations

use crate::schema::FieldKind;
use thiserror::Error;

/// A schema that violates one of the descriptor invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("field name must not be empty")]
    EmptyName,

    #[error("duplicate field name `{0}`")]
    DuplicateField(String),

    #[error("enum field `{0}` must declare at least one value")]
    EmptyEnum(String),

    #[error("constraint `{constraint}` does not apply to {kind} field `{field}`")]
    InapplicableConstraint {
        field: String,
        constraint: String,
        kind: FieldKind,
    },

    #[error("invalid pattern for field `{field}`: {message}")]
    InvalidPattern { field: String, message: String },

    #[error("default for field `{field}` is not a valid {kind}: {message}")]
    InvalidDefault {
        field: String,
        kind: FieldKind,
        message: String,
    },
}

/// Failure reported by a caller-supplied mutation
///
/// Rendered as a global (form-level) error; never attributed to a field.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("{0}")]
    Domain(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MutationError {
    /// A user-facing domain error, e.g. "Email already taken"
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }
}
