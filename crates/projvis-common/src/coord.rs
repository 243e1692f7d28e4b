//! Coordinate pairs and the projected-point wire format.

use serde::{Deserialize, Serialize};

/// A single planar or geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Wire representation of a projected point: `[x|null, y|null]`.
type WirePair = (Option<f64>, Option<f64>);

/// Output of a forward transform for one grid sample.
///
/// Serialized as a two element JSON array. `Invalid` is the `[null, null]`
/// sentinel for samples without a finite image under the projection. A wire
/// pair with a single null or a non-finite number decodes as `Invalid`, so a
/// point is never partially null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "WirePair", into = "WirePair")]
pub enum ProjectedPoint {
    Valid { x: f64, y: f64 },
    Invalid,
}

impl ProjectedPoint {
    /// Build a point from raw transform output, mapping non-finite values
    /// to the sentinel.
    pub fn from_xy(x: f64, y: f64) -> Self {
        if x.is_finite() && y.is_finite() {
            ProjectedPoint::Valid { x, y }
        } else {
            ProjectedPoint::Invalid
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ProjectedPoint::Valid { .. })
    }

    /// The coordinate, if the point is valid.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match *self {
            ProjectedPoint::Valid { x, y } => Some(Coordinate { x, y }),
            ProjectedPoint::Invalid => None,
        }
    }
}

impl From<WirePair> for ProjectedPoint {
    fn from(pair: WirePair) -> Self {
        match pair {
            (Some(x), Some(y)) => ProjectedPoint::from_xy(x, y),
            _ => ProjectedPoint::Invalid,
        }
    }
}

impl From<ProjectedPoint> for WirePair {
    fn from(point: ProjectedPoint) -> Self {
        match point {
            ProjectedPoint::Valid { x, y } => (Some(x), Some(y)),
            ProjectedPoint::Invalid => (None, None),
        }
    }
}
