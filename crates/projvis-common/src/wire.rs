//! Query parameters exchanged with the transform service.
//!
//! Longitudes travel as `minX`/`maxX`, latitudes as `minY`/`maxY`.

use serde::{Deserialize, Serialize};

use crate::domain::SamplingDomain;

/// Parameters of a batch request: project `limit` grid samples from `offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchParams {
    pub proj_to: String,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub step: f64,
    pub offset: u64,
    pub limit: u64,
}

impl BatchParams {
    pub fn new(definition: &str, domain: &SamplingDomain, offset: u64, limit: u64) -> Self {
        Self {
            proj_to: definition.to_string(),
            min_x: domain.min_lon,
            max_x: domain.max_lon,
            min_y: domain.min_lat,
            max_y: domain.max_lat,
            step: domain.step,
            offset,
            limit,
        }
    }

    /// The sampling domain described by these parameters.
    pub fn domain(&self) -> SamplingDomain {
        SamplingDomain::new(self.min_y, self.max_y, self.min_x, self.max_x, self.step)
    }
}

/// Parameters of a single coordinate request. A missing `projFrom` means
/// WGS84 longitude/latitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proj_from: Option<String>,
    pub proj_to: String,
    pub x: f64,
    pub y: f64,
}
