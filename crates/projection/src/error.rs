//! Error types for projection transforms.

use thiserror::Error;

/// Errors raised while initialising or applying a projection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The definition string could not be parsed into a projection.
    #[error("invalid projection definition '{definition}': {message}")]
    InvalidDefinition { definition: String, message: String },

    /// The transform engine rejected a coordinate.
    #[error("transform of ({x}, {y}) failed: {message}")]
    TransformFailed { x: f64, y: f64, message: String },
}

impl ProjectionError {
    /// The engine message without the surrounding context.
    pub fn engine_message(&self) -> &str {
        match self {
            Self::InvalidDefinition { message, .. } | Self::TransformFailed { message, .. } => {
                message
            }
        }
    }
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
