//! proj4rs-backed transformer for PROJ definition strings.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use tracing::debug;

use crate::error::{ProjectionError, Result};
use crate::transform::Transformer;

/// WGS84 longitude/latitude, the source of every sampling grid.
pub const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Transformer between two PROJ definitions.
///
/// Geographic definitions take and return degrees; proj4rs itself works in
/// radians for them, so conversion happens at the boundary.
pub struct ProjTransformer {
    source_definition: String,
    target_definition: String,
    source: Proj,
    target: Proj,
    source_is_geographic: bool,
    target_is_geographic: bool,
}

impl std::fmt::Debug for ProjTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjTransformer")
            .field("source", &self.source_definition)
            .field("target", &self.target_definition)
            .field("source_is_geographic", &self.source_is_geographic)
            .field("target_is_geographic", &self.target_is_geographic)
            .finish_non_exhaustive()
    }
}

impl ProjTransformer {
    /// Transformer from WGS84 longitude/latitude to `definition`.
    pub fn new(definition: &str) -> Result<Self> {
        Self::between(WGS84_LONGLAT, definition)
    }

    /// Transformer from `source` to `target`.
    pub fn between(source: &str, target: &str) -> Result<Self> {
        let source_definition = source.trim().to_string();
        let target_definition = target.trim().to_string();

        let source = parse_definition(&source_definition)?;
        let target = parse_definition(&target_definition)?;

        debug!(
            source = %source_definition,
            target = %target_definition,
            "Initialised projection transformer"
        );

        Ok(Self {
            source_is_geographic: is_geographic_definition(&source_definition),
            target_is_geographic: is_geographic_definition(&target_definition),
            source_definition,
            target_definition,
            source,
            target,
        })
    }

    /// The definition coordinates are transformed from.
    pub fn source_definition(&self) -> &str {
        &self.source_definition
    }

    fn apply(
        from: &Proj,
        to: &Proj,
        from_geographic: bool,
        to_geographic: bool,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64)> {
        let (in_x, in_y) = if from_geographic {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };

        let mut point = (in_x, in_y, 0.0);
        transform(from, to, &mut point).map_err(|e| ProjectionError::TransformFailed {
            x,
            y,
            message: format!("{e:?}"),
        })?;

        if to_geographic {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok((point.0, point.1))
        }
    }
}

impl Transformer for ProjTransformer {
    fn definition(&self) -> &str {
        &self.target_definition
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        Self::apply(
            &self.source,
            &self.target,
            self.source_is_geographic,
            self.target_is_geographic,
            lon,
            lat,
        )
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        Self::apply(
            &self.target,
            &self.source,
            self.target_is_geographic,
            self.source_is_geographic,
            x,
            y,
        )
    }
}

fn parse_definition(definition: &str) -> Result<Proj> {
    if definition.is_empty() {
        return Err(ProjectionError::InvalidDefinition {
            definition: definition.to_string(),
            message: "empty projection definition".to_string(),
        });
    }

    Proj::from_proj_string(definition).map_err(|e| ProjectionError::InvalidDefinition {
        definition: definition.to_string(),
        message: format!("{e:?}"),
    })
}

/// Whether a definition describes geographic (degree based) coordinates.
pub fn is_geographic_definition(definition: &str) -> bool {
    definition
        .split_whitespace()
        .filter_map(|token| token.strip_prefix("+proj="))
        .any(|name| matches!(name, "longlat" | "latlong" | "lonlat" | "latlon"))
}
