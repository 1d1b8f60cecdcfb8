//! Error types for the estimator.
//!
//! Validation is the only way an estimate can fail.  A degenerate
//! refill denominator is reported as a warning on the result, not here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl EstimateError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending input or parameter field.
    pub fn field(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { field, .. } => *field,
        }
    }
}

/// Failures while loading business parameters from disk.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("Failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse parameter file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Parameter file rejected: {0}")]
    Invalid(#[from] EstimateError),
}
