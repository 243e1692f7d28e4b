//! Transform handler: batch projection of a sampling grid, or a single
//! coordinate.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use projection::{ProjTransformer, ProjectionError, Transformer, WGS84_LONGLAT};
use projvis_common::{generate_grid, ProjVisError, ProjVisResult, ProjectedPoint, SamplingDomain};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::state::AppState;

/// Query parameters of `GET /`.
///
/// Any of `minX`, `maxX`, `minY`, `maxY` selects a batch request; otherwise
/// `x` and `y` name a single coordinate.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformQuery {
    pub proj_from: Option<String>,
    pub proj_to: Option<String>,

    /// Longitude bounds of the grid.
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    /// Latitude bounds of the grid.
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
    pub step: Option<f64>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,

    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl TransformQuery {
    fn is_batch(&self) -> bool {
        self.min_x.is_some() || self.max_x.is_some() || self.min_y.is_some() || self.max_y.is_some()
    }
}

/// GET /
pub async fn transform_handler(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<TransformQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            let err = ProjVisError::invalid_parameter("query", rejection.body_text());
            return error_response(&err);
        }
    };

    let max_limit = state.config.max_limit;
    let result = tokio::task::spawn_blocking(move || transform(&query, max_limit)).await;

    match result {
        Ok(Ok(points)) => Json(points).into_response(),
        Ok(Err(err)) => error_response(&err),
        Err(e) => error_response(&ProjVisError::InternalError(format!(
            "transform task failed: {}",
            e
        ))),
    }
}

/// Answer a transform query.
pub fn transform(query: &TransformQuery, max_limit: u64) -> ProjVisResult<Vec<ProjectedPoint>> {
    let proj_to = required(&query.proj_to, "projTo")?;

    if query.is_batch() {
        let domain = SamplingDomain::new(
            required(&query.min_y, "minY")?,
            required(&query.max_y, "maxY")?,
            required(&query.min_x, "minX")?,
            required(&query.max_x, "maxX")?,
            query.step.unwrap_or(1.0),
        );
        let offset = query.offset.unwrap_or(0);
        let limit = query.limit.unwrap_or(1);
        if limit > max_limit {
            return Err(ProjVisError::invalid_parameter(
                "limit",
                format!("{} exceeds the maximum of {}", limit, max_limit),
            ));
        }
        project_batch(&proj_to, &domain, offset, limit)
    } else {
        let from = query.proj_from.as_deref().unwrap_or(WGS84_LONGLAT);
        let x = required(&query.x, "x")?;
        let y = required(&query.y, "y")?;
        project_point(from, &proj_to, x, y).map(|point| vec![point])
    }
}

/// Project `limit` grid samples of `domain` from `offset` into `definition`.
pub fn project_batch(
    definition: &str,
    domain: &SamplingDomain,
    offset: u64,
    limit: u64,
) -> ProjVisResult<Vec<ProjectedPoint>> {
    domain.check_step()?;
    let transformer = ProjTransformer::new(definition).map_err(invalid_projection)?;

    let points: Vec<ProjectedPoint> = generate_grid(domain, offset, limit)
        .into_iter()
        .map(|(lon, lat)| project(&transformer, lon, lat))
        .collect();

    debug!(offset, limit, count = points.len(), "Projected batch");
    Ok(points)
}

/// Transform one coordinate from `from` into `to`.
pub fn project_point(from: &str, to: &str, x: f64, y: f64) -> ProjVisResult<ProjectedPoint> {
    let transformer = ProjTransformer::between(from, to).map_err(invalid_projection)?;
    Ok(project(&transformer, x, y))
}

fn project(transformer: &ProjTransformer, x: f64, y: f64) -> ProjectedPoint {
    match transformer.forward(x, y) {
        Ok((px, py)) => ProjectedPoint::from_xy(px, py),
        Err(_) => ProjectedPoint::Invalid,
    }
}

fn required<T: Clone>(value: &Option<T>, name: &str) -> ProjVisResult<T> {
    value
        .clone()
        .ok_or_else(|| ProjVisError::MissingParameter(name.to_string()))
}

fn invalid_projection(err: ProjectionError) -> ProjVisError {
    match err {
        ProjectionError::InvalidDefinition { definition, message } => {
            ProjVisError::InvalidProjection { definition, message }
        }
        other => ProjVisError::TransformFailed(other.to_string()),
    }
}

fn error_response(err: &ProjVisError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    warn!(status = status.as_u16(), error = %err, "Transform request failed");
    (status, Json(err.to_string())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERCATOR: &str = "+proj=merc +a=6378137 +b=6378137 +lon_0=0 +units=m";

    fn batch_query(proj_to: &str) -> TransformQuery {
        TransformQuery {
            proj_to: Some(proj_to.to_string()),
            min_x: Some(0.0),
            max_x: Some(1.0),
            min_y: Some(0.0),
            max_y: Some(1.0),
            step: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_batch_limit_defaults_to_one() {
        let points = transform(&batch_query(WGS84_LONGLAT), 10_000).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_batch_limit_above_maximum_is_rejected() {
        let mut query = batch_query(WGS84_LONGLAT);
        query.limit = Some(100);
        let err = transform(&query, 2).unwrap_err();
        assert!(matches!(err, ProjVisError::InvalidParameter { ref param, .. } if param == "limit"));
        assert_eq!(err.http_status_code(), 400);

        query.limit = Some(2);
        assert_eq!(transform(&query, 2).unwrap().len(), 2);
        query.limit = Some(100);
        assert_eq!(transform(&query, 10_000).unwrap().len(), 4);
    }

    #[test]
    fn test_batch_past_end_is_empty() {
        let mut query = batch_query(WGS84_LONGLAT);
        query.offset = Some(4);
        query.limit = Some(10);
        assert!(transform(&query, 10_000).unwrap().is_empty());
    }

    #[test]
    fn test_batch_missing_bound() {
        let mut query = batch_query(WGS84_LONGLAT);
        query.max_y = None;
        let err = transform(&query, 10_000).unwrap_err();
        assert!(matches!(err, ProjVisError::MissingParameter(ref p) if p == "maxY"));
    }

    #[test]
    fn test_batch_rejects_small_step() {
        let mut query = batch_query(WGS84_LONGLAT);
        query.step = Some(0.0005);
        let err = transform(&query, 10_000).unwrap_err();
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_missing_proj_to() {
        let query = TransformQuery {
            x: Some(0.0),
            y: Some(0.0),
            ..Default::default()
        };
        let err = transform(&query, 10_000).unwrap_err();
        assert!(matches!(err, ProjVisError::MissingParameter(ref p) if p == "projTo"));
    }

    #[test]
    fn test_single_point_defaults_to_wgs84_source() {
        let query = TransformQuery {
            proj_to: Some(MERCATOR.to_string()),
            x: Some(10.0),
            y: Some(0.0),
            ..Default::default()
        };
        let points = transform(&query, 10_000).unwrap();
        assert_eq!(points.len(), 1);
        let coordinate = points[0].coordinate().unwrap();
        assert!((coordinate.x - 1_113_194.9).abs() < 1.0);
        assert!(coordinate.y.abs() < 1e-6);
    }

    #[test]
    fn test_invalid_projection_message() {
        let err = project_point(WGS84_LONGLAT, "+proj=bogus", 0.0, 0.0).unwrap_err();
        assert_eq!(err.http_status_code(), 400);
        let message = err.to_string();
        assert!(message.starts_with("Invalid projection: +proj=bogus: (Internal Proj Error: "));
        assert!(message.ends_with(')'));
    }
}
