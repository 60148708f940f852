//! Error types for specification composition and filtering
//!
//! Every error here is raised at the point of misuse (building a combinator,
//! starting a filter, building a rule tree) and never from inside lazy
//! evaluation.

/// Library-wide error type
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    // Composition errors
    #[error("Invalid composition: {0}")]
    InvalidComposition(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Registry errors
    #[error("Unknown specification: {0}")]
    UnknownSpecification(String),

    #[error("Invalid parameters for specification '{name}': {reason}")]
    InvalidParameters { name: String, reason: String },

    // Rule configuration errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SpecError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidComposition(_) => "INVALID_COMPOSITION",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::UnknownSpecification(_) => "UNKNOWN_SPECIFICATION",
            Self::InvalidParameters { .. } => "INVALID_PARAMETERS",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Result type alias using SpecError
pub type SpecResult<T> = Result<T, SpecError>;
