//! Error types for timetable generation.

use thiserror::Error;

use crate::sat::OracleError;
use crate::validation::ValidationError;

/// Result type for generation requests.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Failures that abort a generation request.
///
/// Empty outcomes (proven conflicts, empty samples) are not errors; see
/// [`GenerationStatus`](crate::scheduler::GenerationStatus).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// The request failed validation.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The satisfiability oracle timed out or crashed.
    #[error("solver unavailable: {0}")]
    SolverUnavailable(#[from] OracleError),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for GenerateError {
    fn from(errors: Vec<ValidationError>) -> Self {
        GenerateError::InvalidInput(errors)
    }
}
