//! HTTP client for the remote transform service.

use lazy_static::lazy_static;
use projvis_common::{BatchParams, PointParams, ProjectedPoint, SamplingDomain};
use regex::Regex;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::ProjectorConfig;
use crate::error::{ProjectorError, Result};

lazy_static! {
    static ref ENGINE_ERROR: Regex = Regex::new(r"\(Internal Proj Error: (.*)\)").unwrap();
}

/// Client for one transform service endpoint.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    endpoint: Url,
}

impl RemoteClient {
    /// Create a client for `endpoint` using the timeouts from `config`.
    pub fn new(endpoint: &str, config: &ProjectorConfig) -> Result<Self> {
        let endpoint = Url::parse(endpoint.trim()).map_err(|e| ProjectorError::InvalidEndpoint {
            url: endpoint.to_string(),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ProjectorError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Project `limit` grid samples of `domain` starting at `offset`.
    #[instrument(skip(self, domain), fields(endpoint = %self.endpoint))]
    pub async fn project_batch(
        &self,
        definition: &str,
        domain: &SamplingDomain,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ProjectedPoint>> {
        let params = BatchParams::new(definition, domain, offset, limit);
        let points: Vec<ProjectedPoint> = self.get_json(&params).await?;
        debug!(count = points.len(), "Received projected batch");
        Ok(points)
    }

    /// Transform one coordinate from `from` (WGS84 lon/lat when `None`) to `to`.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn transform(
        &self,
        from: Option<&str>,
        to: &str,
        x: f64,
        y: f64,
    ) -> Result<ProjectedPoint> {
        let params = PointParams {
            proj_from: from.map(str::to_string),
            proj_to: to.to_string(),
            x,
            y,
        };
        let points: Vec<ProjectedPoint> = self.get_json(&params).await?;
        points
            .into_iter()
            .next()
            .ok_or_else(|| ProjectorError::Decode("empty response array".to_string()))
    }

    /// Ask the service to transform `(0, 0)` into `definition`.
    ///
    /// On a non-success status the error carries the engine message when the
    /// body embeds one.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn probe(&self, definition: &str) -> Result<()> {
        let params = PointParams {
            proj_from: None,
            proj_to: definition.to_string(),
            x: 0.0,
            y: 0.0,
        };
        let response = self.client.get(self.endpoint.clone()).query(&params).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ProjectorError::Status {
            status: status.as_u16(),
            body: extract_engine_message(&body),
        })
    }

    async fn get_json<Q, T>(&self, params: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.get(self.endpoint.clone()).query(params).send().await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ProjectorError::Decode(e.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProjectorError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Pull the engine error out of a transform service error body.
///
/// The body is expected to be JSON; a JSON string is used as-is, other JSON
/// values as their text and unparseable bodies raw. The capture of
/// `(Internal Proj Error: ...)` wins when present.
pub fn extract_engine_message(body: &str) -> String {
    let text = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(message)) => message,
        Ok(other) => other.to_string(),
        Err(_) => body.to_string(),
    };

    match ENGINE_ERROR.captures(&text).and_then(|caps| caps.get(1)) {
        Some(found) => found.as_str().to_string(),
        None => text,
    }
}
