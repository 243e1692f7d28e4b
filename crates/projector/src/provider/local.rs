//! In-process transforms.

use async_trait::async_trait;
use projection::{ProjTransformer, Transformer};
use projvis_common::{Batch, ProjectedPoint, SamplingDomain};

use super::{TransformProvider, Validation};
use crate::error::Result;

/// Projects batches with a transformer built once per run.
#[derive(Debug)]
pub struct LocalProvider<T> {
    transformer: T,
}

impl LocalProvider<ProjTransformer> {
    /// Build a provider for a PROJ definition.
    pub fn from_definition(definition: &str) -> Result<Self> {
        Ok(Self::new(ProjTransformer::new(definition)?))
    }
}

impl<T: Transformer> LocalProvider<T> {
    pub fn new(transformer: T) -> Self {
        Self { transformer }
    }

    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// Forward-transform every point, mapping failures and non-finite output
    /// to the sentinel.
    pub fn project_points(&self, points: &[(f64, f64)]) -> Vec<ProjectedPoint> {
        points
            .iter()
            .map(|&(lon, lat)| match self.transformer.forward(lon, lat) {
                Ok((x, y)) => ProjectedPoint::from_xy(x, y),
                Err(_) => ProjectedPoint::Invalid,
            })
            .collect()
    }
}

#[async_trait]
impl<T: Transformer> TransformProvider for LocalProvider<T> {
    async fn validate(&self) -> Validation {
        match self.transformer.forward(0.0, 0.0) {
            Ok(_) => Validation::valid(),
            Err(e) => Validation::invalid(e.to_string()),
        }
    }

    async fn project_batch(
        &self,
        _domain: &SamplingDomain,
        batch: &Batch,
    ) -> Result<Vec<ProjectedPoint>> {
        let projected = self.project_points(&batch.points);

        // Once per batch, so other tasks (including a newer run) get to go.
        tokio::task::yield_now().await;

        Ok(projected)
    }
}
