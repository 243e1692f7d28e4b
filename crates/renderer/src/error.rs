//! Error types for rendering.

use thiserror::Error;

/// Errors raised while building or writing canvases.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The coordinate arrays handed to a canvas differ in length.
    #[error("Mismatched sample arrays: {0}")]
    Mismatched(String),

    #[error("Invalid step {0}: it must be positive and finite")]
    InvalidStep(f64),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

pub(crate) fn check_lengths(lengths: &[(&str, usize)]) -> Result<()> {
    let Some(&(first_name, first_len)) = lengths.first() else {
        return Ok(());
    };
    for &(name, len) in &lengths[1..] {
        if len != first_len {
            return Err(RenderError::Mismatched(format!(
                "{} has {} entries but {} has {}",
                name, len, first_name, first_len
            )));
        }
    }
    Ok(())
}
