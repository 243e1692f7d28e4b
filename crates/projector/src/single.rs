//! On-demand transform of a single coordinate.

use projection::{ProjTransformer, Transformer, WGS84_LONGLAT};
use projvis_common::{Coordinate, ProjectedPoint};
use tracing::debug;

use crate::error::Result;
use crate::remote::RemoteClient;

/// Transform one coordinate between WGS84 longitude/latitude and
/// `definition`.
///
/// Forward maps lon/lat to projected coordinates; `reverse` maps projected
/// coordinates back to lon/lat. Returns `None` when the coordinate has no
/// finite image.
pub async fn transform_one(
    coordinate: Coordinate,
    definition: &str,
    remote: Option<&RemoteClient>,
    reverse: bool,
) -> Result<Option<Coordinate>> {
    let point = match remote {
        None => {
            let transformer = ProjTransformer::new(definition)?;
            let output = if reverse {
                transformer.inverse(coordinate.x, coordinate.y)
            } else {
                transformer.forward(coordinate.x, coordinate.y)
            };
            match output {
                Ok((x, y)) => ProjectedPoint::from_xy(x, y),
                Err(e) => {
                    debug!(error = %e, "Coordinate has no image under the projection");
                    ProjectedPoint::Invalid
                }
            }
        }
        Some(client) => {
            let (from, to) = if reverse {
                (definition, WGS84_LONGLAT)
            } else {
                (WGS84_LONGLAT, definition)
            };
            client
                .transform(Some(from), to, coordinate.x, coordinate.y)
                .await?
        }
    };

    Ok(point.coordinate())
}
