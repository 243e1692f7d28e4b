//! Error types for projection runs.

use projection::ProjectionError;
use thiserror::Error;

/// Errors that can end a projection run or a remote call.
///
/// `StepTooSmall` and `InvalidProjection` are rejections raised before a run
/// starts. Cancellation is not an error, see `RunOutcome::Cancelled`.
#[derive(Error, Debug)]
pub enum ProjectorError {
    /// The sampling step is at or below the minimum.
    #[error("step {0} is too small, it must be greater than 0.001")]
    StepTooSmall(f64),

    /// The projection failed validation.
    #[error("projection is invalid: {0}")]
    InvalidProjection(String),

    /// A batch could not be transformed. The run is abandoned.
    #[error("batch at offset {offset} failed: {message}")]
    BatchTransform { offset: u64, message: String },

    /// The HTTP request did not complete (connection, timeout, ...).
    #[error("request to transform service failed: {0}")]
    Request(String),

    /// The transform service answered with a non-success status.
    #[error("transform service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The transform service answered with an unexpected body.
    #[error("failed to decode transform service response: {0}")]
    Decode(String),

    /// The remote endpoint URL is malformed.
    #[error("invalid transform service URL '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    /// Local projection error.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProjectorError {
    /// Whether the error rejected the run before it started.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::StepTooSmall(_) | Self::InvalidProjection(_))
    }

    /// Wrap an error raised while transforming the batch at `offset`.
    pub fn batch(offset: u64, err: impl std::fmt::Display) -> Self {
        Self::BatchTransform {
            offset,
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ProjectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Request(format!("request timed out: {}", err))
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Result type for projector operations.
pub type Result<T> = std::result::Result<T, ProjectorError>;
