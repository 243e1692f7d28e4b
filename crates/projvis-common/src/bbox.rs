//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// For geographic coordinates the units are degrees, for projected
/// coordinates they are whatever the projection produces (usually meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Compute the extents of two parallel coordinate sequences.
    ///
    /// Returns `None` when either sequence is empty.
    pub fn from_coordinates(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.is_empty() || ys.is_empty() {
            return None;
        }

        let (min_x, max_x) = min_max(xs);
        let (min_y, max_y) = min_max(ys);

        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Parse a bbox string: "minx,miny,maxx,maxy"
    pub fn parse(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let bbox = Self {
            min_x: parts[0]
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(parts[0].to_string()))?,
            min_y: parts[1]
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(parts[1].to_string()))?,
            max_x: parts[2]
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(parts[2].to_string()))?,
            max_y: parts[3]
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(parts[3].to_string()))?,
        };

        if bbox.max_x < bbox.min_x || bbox.max_y < bbox.min_y {
            return Err(BboxParseError::Inverted(s.to_string()));
        }

        Ok(bbox)
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),

    #[error("BBOX minimum exceeds maximum: {0}")]
    Inverted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox() {
        let bbox = BoundingBox::parse("-125.0,24.0,-66.0,50.0").unwrap();
        assert_eq!(bbox.min_x, -125.0);
        assert_eq!(bbox.min_y, 24.0);
        assert_eq!(bbox.max_x, -66.0);
        assert_eq!(bbox.max_y, 50.0);
    }

    #[test]
    fn test_from_coordinates() {
        let bbox = BoundingBox::from_coordinates(&[3.0, -1.0, 2.0], &[10.0, 20.0, -5.0]).unwrap();
        assert_eq!(bbox, BoundingBox::new(-1.0, -5.0, 3.0, 20.0));
        assert!(BoundingBox::from_coordinates(&[], &[1.0]).is_none());
    }
}
