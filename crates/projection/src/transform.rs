//! The transform interface consumed by projection pipelines.

use crate::error::Result;

/// A bidirectional mapping between WGS84 longitude/latitude (degrees) and a
/// target projection.
///
/// Implementations may return non-finite values for coordinates outside the
/// projection's valid domain instead of an error; callers must check.
pub trait Transformer: Send + Sync {
    /// The definition the transformer was built from.
    fn definition(&self) -> &str;

    /// Geographic `(lon, lat)` to projected `(x, y)`.
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64)>;

    /// Projected `(x, y)` to geographic `(lon, lat)`.
    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)>;
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn definition(&self) -> &str {
        (**self).definition()
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        (**self).forward(lon, lat)
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        (**self).inverse(x, y)
    }
}
