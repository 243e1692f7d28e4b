//! Error types for proj-vis services.

use thiserror::Error;

/// Result type alias using ProjVisError.
pub type ProjVisResult<T> = Result<T, ProjVisError>;

/// Primary error type for requests crossing a service boundary.
#[derive(Debug, Error)]
pub enum ProjVisError {
    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Step {0} is too small, it must be greater than 0.001")]
    StepTooSmall(f64),

    // === Projection Errors ===
    /// The projection definition could not be initialised. The message keeps
    /// the `(Internal Proj Error: ...)` wrapper clients look for.
    #[error("Invalid projection: {definition}: (Internal Proj Error: {message})")]
    InvalidProjection { definition: String, message: String },

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ProjVisError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ProjVisError::MissingParameter(_)
            | ProjVisError::InvalidParameter { .. }
            | ProjVisError::StepTooSmall(_)
            | ProjVisError::InvalidProjection { .. } => 400,

            ProjVisError::TransformFailed(_) => 422,
            ProjVisError::InternalError(_) => 500,
        }
    }

    /// Shorthand for an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_projection_message_embeds_engine_error() {
        let err = ProjVisError::InvalidProjection {
            definition: "+proj=nope".to_string(),
            message: "unknown projection".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid projection: +proj=nope: (Internal Proj Error: unknown projection)"
        );
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ProjVisError::MissingParameter("x".into()).http_status_code(), 400);
        assert_eq!(ProjVisError::invalid_parameter("limit", "too big").http_status_code(), 400);
        assert_eq!(ProjVisError::TransformFailed("x".into()).http_status_code(), 422);
        assert_eq!(ProjVisError::InternalError("boom".into()).http_status_code(), 500);
    }
}
