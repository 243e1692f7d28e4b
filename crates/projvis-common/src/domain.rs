//! The rectangular longitude/latitude region sampled by a projection run.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{ProjVisError, ProjVisResult};

/// Smallest step (exclusive) a domain may be sampled with, in degrees.
pub const MIN_STEP: f64 = 0.001;

/// Decimal scale applied to ranges and steps before counting samples.
///
/// Counting on integers avoids `floor(0.3 / 0.1) == 2` style artifacts.
pub const SCALE: f64 = 1_000_000.0;

/// Immutable description of the grid to sample, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingDomain {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub step: f64,
}

impl SamplingDomain {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64, step: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
            step,
        }
    }

    /// The whole globe sampled at `step` degrees.
    pub fn full_globe(step: f64) -> Self {
        Self::new(-90.0, 90.0, -180.0, 180.0, step)
    }

    /// Build a domain from a lon/lat bounding box.
    pub fn from_bbox(bbox: &BoundingBox, step: f64) -> Self {
        Self::new(bbox.min_y, bbox.max_y, bbox.min_x, bbox.max_x, step)
    }

    /// Lon/lat extent of the domain as a bounding box.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }

    /// Reject steps that are too small (or NaN) to sample with.
    pub fn check_step(&self) -> ProjVisResult<()> {
        if self.step > MIN_STEP {
            Ok(())
        } else {
            Err(ProjVisError::StepTooSmall(self.step))
        }
    }

    /// Number of samples along the longitude axis.
    pub fn lon_count(&self) -> u64 {
        axis_count(self.min_lon, self.max_lon, self.step)
    }

    /// Number of samples along the latitude axis.
    pub fn lat_count(&self) -> u64 {
        axis_count(self.min_lat, self.max_lat, self.step)
    }

    /// Total number of grid samples.
    pub fn total_samples(&self) -> u64 {
        self.lon_count().saturating_mul(self.lat_count())
    }

    /// Coordinates `(lon, lat)` of the sample at a linear row-major position.
    pub fn position(&self, pos: u64) -> Option<(f64, f64)> {
        let lon_count = self.lon_count();
        if lon_count == 0 || pos >= self.total_samples() {
            return None;
        }

        let lon = self.min_lon + (pos % lon_count) as f64 * self.step;
        let lat = self.min_lat + (pos / lon_count) as f64 * self.step;
        Some((lon, lat))
    }
}

fn axis_count(min: f64, max: f64, step: f64) -> u64 {
    let scaled_range = ((max - min) * SCALE).round();
    let scaled_step = (step * SCALE).round();

    // Also rejects NaN ranges and steps.
    if !(scaled_range >= 0.0) || !(scaled_step > 0.0) || !scaled_range.is_finite() {
        return 0;
    }

    // The cast saturates for absurd ranges.
    ((scaled_range / scaled_step).floor() as u64).saturating_add(1)
}
