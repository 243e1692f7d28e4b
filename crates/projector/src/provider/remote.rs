//! Transforms delegated to the HTTP transform service.

use async_trait::async_trait;
use projvis_common::{Batch, ProjectedPoint, SamplingDomain};

use super::{TransformProvider, Validation};
use crate::error::{ProjectorError, Result};
use crate::remote::RemoteClient;

/// Sends one request per batch; the service regenerates the grid window from
/// the domain, offset and limit.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    client: RemoteClient,
    definition: String,
}

impl RemoteProvider {
    pub fn new(client: RemoteClient, definition: &str) -> Self {
        Self {
            client,
            definition: definition.trim().to_string(),
        }
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }
}

#[async_trait]
impl TransformProvider for RemoteProvider {
    async fn validate(&self) -> Validation {
        match self.client.probe(&self.definition).await {
            Ok(()) => Validation::valid(),
            Err(ProjectorError::Status { body, .. }) => Validation::invalid(body),
            Err(e) => Validation::invalid(e.to_string()),
        }
    }

    async fn project_batch(
        &self,
        domain: &SamplingDomain,
        batch: &Batch,
    ) -> Result<Vec<ProjectedPoint>> {
        self.client
            .project_batch(&self.definition, domain, batch.offset, batch.limit)
            .await
            .map_err(|e| ProjectorError::batch(batch.offset, e))
    }
}
