//! Raster output for projection runs.
//!
//! - [`ValidCoordinatesCanvas`]: the samples that survived projection,
//!   plotted on a lon/lat grid with one pixel per sample
//! - [`ProjectedCanvas`]: the same samples at their projected positions,
//!   scaled to fit a 1000 px canvas
//! - [`ImageColorSource`]: color lookup backed by a decoded world image

pub mod error;
pub mod projected;
pub mod source;
pub mod valid;

pub use error::{RenderError, Result};
pub use projected::{ProjectedCanvas, CANVAS_SIZE, PADDING};
pub use source::ImageColorSource;
pub use valid::ValidCoordinatesCanvas;
