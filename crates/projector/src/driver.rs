//! The batched projection driver.
//!
//! A run moves through `Validating -> Running -> Completed | Cancelled`, or
//! is rejected before it starts:
//!
//! ```text
//! run(request)
//!   │
//!   ├─► step <= 0.001 ............................ Err(StepTooSmall)
//!   ├─► provider.validate() fails ................ Err(InvalidProjection)
//!   │
//!   ├─► mint token, progress (0, 0.0)
//!   │
//!   ├─► for each batch, in offset order
//!   │      ├─► token superseded? ................. Ok(Cancelled)
//!   │      ├─► project batch (suspends)
//!   │      ├─► token superseded? ................. Ok(Cancelled)
//!   │      ├─► progress (valid so far, fraction)
//!   │      └─► keep valid samples + colors
//!   │
//!   ├─► progress (valid, 1.0)
//!   ├─► token superseded? ........................ Ok(Cancelled)
//!   └─► on_finished(result) ...................... Ok(Completed)
//! ```

use projvis_common::{Batch, ColorSource, ProjectedPoint, Rgba, SamplingDomain};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::ProjectorConfig;
use crate::error::{ProjectorError, Result};
use crate::observer::RunObserver;
use crate::provider::{LocalProvider, RemoteProvider, TransformProvider};
use crate::remote::RemoteClient;
use crate::token::{RunRegister, RunToken};

/// What to project and where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// PROJ definition of the target projection.
    pub definition: String,
    pub domain: SamplingDomain,
    /// Transform service URL; `None` projects locally.
    pub endpoint: Option<String>,
}

impl ProjectionRequest {
    pub fn local(definition: impl Into<String>, domain: SamplingDomain) -> Self {
        Self {
            definition: definition.into(),
            domain,
            endpoint: None,
        }
    }

    pub fn remote(
        definition: impl Into<String>,
        domain: SamplingDomain,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            definition: definition.into(),
            domain,
            endpoint: Some(endpoint.into()),
        }
    }
}

/// Valid samples of a completed run as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectionResult {
    /// The step the grid was sampled with.
    pub step: f64,
    pub valid_lons: Vec<f64>,
    pub valid_lats: Vec<f64>,
    pub projected_x: Vec<f64>,
    pub projected_y: Vec<f64>,
    pub colors: Vec<Rgba>,
}

impl ProjectionResult {
    fn new(step: f64) -> Self {
        Self {
            step,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.valid_lons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_lons.is_empty()
    }

    fn push(&mut self, lon: f64, lat: f64, x: f64, y: f64, color: Rgba) {
        self.valid_lons.push(lon);
        self.valid_lats.push(lat);
        self.projected_x.push(x);
        self.projected_y.push(y);
        self.colors.push(color);
    }

    /// Append the valid samples of a projected batch.
    fn extend(&mut self, batch: &Batch, projected: &[ProjectedPoint], colors: &dyn ColorSource) {
        for (&(lon, lat), point) in batch.points.iter().zip(projected) {
            if let ProjectedPoint::Valid { x, y } = *point {
                self.push(lon, lat, x, y, colors.color_at(lon, lat));
            }
        }
    }
}

/// How a run that was not rejected ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(ProjectionResult),
    /// A newer run took over; nothing was published.
    Cancelled,
}

impl RunOutcome {
    pub fn into_result(self) -> Option<ProjectionResult> {
        match self {
            RunOutcome::Completed(result) => Some(result),
            RunOutcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled)
    }
}

/// Drives projection runs. Runs started from the same driver (or drivers
/// sharing a [`RunRegister`]) cancel each other: only the newest one
/// publishes.
#[derive(Debug, Clone, Default)]
pub struct ProjectionDriver {
    config: ProjectorConfig,
    register: RunRegister,
}

impl ProjectionDriver {
    pub fn new(config: ProjectorConfig) -> Self {
        Self::with_register(config, RunRegister::new())
    }

    pub fn with_register(config: ProjectorConfig, register: RunRegister) -> Self {
        Self { config, register }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    pub fn register(&self) -> &RunRegister {
        &self.register
    }

    /// Build the provider a request asks for.
    pub fn provider_for(&self, request: &ProjectionRequest) -> Result<Box<dyn TransformProvider>> {
        match &request.endpoint {
            None => Ok(Box::new(LocalProvider::from_definition(&request.definition)?)),
            Some(url) => {
                let client = RemoteClient::new(url, &self.config)?;
                Ok(Box::new(RemoteProvider::new(client, &request.definition)))
            }
        }
    }

    /// Project a request with the provider it selects.
    #[instrument(skip_all, fields(definition = %request.definition, remote = request.endpoint.is_some()))]
    pub async fn run(
        &self,
        request: &ProjectionRequest,
        colors: &dyn ColorSource,
        observer: &mut dyn RunObserver,
    ) -> Result<RunOutcome> {
        check_step(&request.domain)?;

        let provider = match self.provider_for(request) {
            Ok(provider) => provider,
            Err(ProjectorError::Projection(e)) => {
                warn!(error = %e, "Rejected run: projection could not be initialised");
                return Err(ProjectorError::InvalidProjection(e.to_string()));
            }
            Err(e) => return Err(e),
        };

        self.run_with(provider.as_ref(), &request.domain, colors, observer)
            .await
    }

    /// Project `domain` with an explicit provider.
    pub async fn run_with(
        &self,
        provider: &dyn TransformProvider,
        domain: &SamplingDomain,
        colors: &dyn ColorSource,
        observer: &mut dyn RunObserver,
    ) -> Result<RunOutcome> {
        check_step(domain)?;

        let validation = provider.validate().await;
        if !validation.valid {
            let message = validation
                .message
                .unwrap_or_else(|| "projection failed validation".to_string());
            warn!(message = %message, "Rejected run: projection is invalid");
            return Err(ProjectorError::InvalidProjection(message));
        }

        let token = self.register.begin();
        observer.on_process_id_assigned(token);

        let total = domain.total_samples();
        let limit = self.config.batch_limit.max(1);
        info!(token = %token, total_samples = total, batch_limit = limit, "Starting projection run");

        observer.on_progress(0, 0.0);

        let mut result = ProjectionResult::new(domain.step);
        let mut offset = 0u64;
        let mut collected = 0u64;

        while collected < total {
            if self.superseded(token) {
                return Ok(RunOutcome::Cancelled);
            }

            let batch = Batch::generate(domain, offset, limit);
            let projected = provider.project_batch(domain, &batch).await?;

            if self.superseded(token) {
                return Ok(RunOutcome::Cancelled);
            }

            if projected.len() != batch.len() {
                warn!(
                    offset,
                    expected = batch.len(),
                    received = projected.len(),
                    "Provider returned a batch of the wrong size"
                );
                return Err(ProjectorError::batch(
                    offset,
                    format!(
                        "provider returned {} points for a batch of {}",
                        projected.len(),
                        batch.len()
                    ),
                ));
            }

            // Nominal accounting: a short tail batch still counts as `limit`.
            offset += limit;
            collected += limit;

            observer.on_progress(result.len(), progress_fraction(collected, total));
            result.extend(&batch, &projected, colors);

            debug!(offset = batch.offset, points = batch.len(), valid = result.len(), "Projected batch");
        }

        observer.on_progress(result.len(), 1.0);

        if self.superseded(token) {
            return Ok(RunOutcome::Cancelled);
        }

        info!(token = %token, valid_samples = result.len(), "Projection run completed");
        observer.on_finished(&result);
        Ok(RunOutcome::Completed(result))
    }

    fn superseded(&self, token: RunToken) -> bool {
        if self.register.is_current(token) {
            return false;
        }
        warn!(token = %token, current = ?self.register.current(), "Projection run superseded, abandoning");
        true
    }
}

fn check_step(domain: &SamplingDomain) -> Result<()> {
    domain.check_step().map_err(|_| {
        warn!(step = domain.step, "Rejected run: step too small");
        ProjectorError::StepTooSmall(domain.step)
    })
}

fn progress_fraction(collected: u64, total: u64) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (collected as f64 / total as f64).min(1.0)
}
