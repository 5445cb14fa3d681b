//! Error types for assertion building and execution

use ma_core::ResolveError;
use thiserror::Error;

/// Result type for assertion operations
pub type AssertResult<T> = Result<T, AssertError>;

/// Errors that can end a declaration or a run
///
/// Comparison mismatches are not part of this enum: they are recorded as
/// failure outcomes and only surface, counted, through [`AssertError::Aggregate`].
#[derive(Debug, Error)]
pub enum AssertError {
    /// No object to test was given
    #[error("'actual' parameter is null in constructor.")]
    MissingActual,

    /// Actual and expected objects are of different types
    #[error("Both parameters must be of the same type. Actual : '{actual}' / Expected : '{expected}'")]
    TypeMismatch { actual: String, expected: String },

    /// Field-to-field checks were declared without an expected object
    #[error("'expected' parameter is null in constructor.")]
    MissingExpected,

    /// A literal-value check was declared with an empty path
    #[error("declare_value() - field name parameter is empty.")]
    EmptyFieldName,

    /// A declared path could not be parsed or resolved
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// At least one check failed; details were already reported
    #[error("See the logs for the details on the {count} error(s).")]
    Aggregate { count: usize },
}

/// Coarse classification of an [`AssertError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid actual/expected pair
    Construction,
    /// Invalid declaration, detected before any check runs
    Configuration,
    /// Path that could not be resolved mid-run
    Resolution,
    /// Failed checks
    Aggregate,
}

impl AssertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AssertError::MissingActual | AssertError::TypeMismatch { .. } => {
                ErrorCategory::Construction
            }
            AssertError::MissingExpected | AssertError::EmptyFieldName => {
                ErrorCategory::Configuration
            }
            AssertError::Resolve(err) if err.is_configuration() => ErrorCategory::Configuration,
            AssertError::Resolve(_) => ErrorCategory::Resolution,
            AssertError::Aggregate { .. } => ErrorCategory::Aggregate,
        }
    }

    /// Number of failed checks, for aggregate failures
    pub fn failure_count(&self) -> Option<usize> {
        match self {
            AssertError::Aggregate { count } => Some(*count),
            _ => None,
        }
    }
}
