//! Transform providers: interchangeable strategies for projecting a batch.

mod local;
mod remote;

pub use local::LocalProvider;
pub use remote::RemoteProvider;

use async_trait::async_trait;
use projvis_common::{Batch, ProjectedPoint, SamplingDomain};
use serde::Serialize;

use crate::error::Result;

/// Outcome of probing a projection definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub message: Option<String>,
}

impl Validation {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Produces projected coordinates for batches of grid samples.
///
/// Implementations return exactly one point per input sample, in input
/// order, using [`ProjectedPoint::Invalid`] for samples without a finite
/// image. An error fails the whole batch.
#[async_trait]
pub trait TransformProvider: Send + Sync {
    /// Probe the projection by transforming a reference point.
    async fn validate(&self) -> Validation;

    /// Project the samples of `batch`, taken from `domain`.
    async fn project_batch(
        &self,
        domain: &SamplingDomain,
        batch: &Batch,
    ) -> Result<Vec<ProjectedPoint>>;
}
