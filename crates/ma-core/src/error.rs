//! Errors raised while resolving field paths

use thiserror::Error;

/// Result type for path resolution
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur when resolving a field path against an object
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Path has more than one '.' separator, or an empty segment
    #[error("The sub-field '{path}' is incorrectly named. 1 dot '.' is required.")]
    MalformedPath { path: String },

    /// Top-level field is not in the catalog of the source type
    #[error("The field '{field}' does not exist in the type '{type_name}'. Check your String parameters.")]
    UnknownField { field: String, type_name: String },

    /// Sub-field is not in the catalog of the intermediate value's type
    #[error("The sub-field '{sub_field}' does not exist in the field '{field}'.")]
    UnknownSubField { sub_field: String, field: String },

    /// Intermediate value is null, so its sub-field can not be read
    #[error("The field value '{field}' cannot be null to fetch sub-field '{sub_field}'.")]
    NullIntermediate { field: String, sub_field: String },

    /// Registered accessor rejected the instance it was given
    #[error("The field named '{field}' could not be read on a value of the type '{type_name}'.")]
    Inaccessible { field: String, type_name: String },
}

impl ResolveError {
    /// Whether the error is a mistake in the declared paths rather than in the data
    ///
    /// Malformed paths and unknown top-level fields can be detected before any
    /// value is read; the other variants only show up while resolving.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ResolveError::MalformedPath { .. } | ResolveError::UnknownField { .. }
        )
    }
}
