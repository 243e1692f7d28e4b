//! Run observer that reports through `tracing`.

use projector::{ProjectionResult, RunObserver, RunToken};
use tracing::info;

/// Logs run events, reporting progress at most once per `step` of the
/// processed fraction.
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    step: f64,
    next_report: f64,
    token: Option<RunToken>,
    last_progress: Option<(usize, f64)>,
}

impl LoggingObserver {
    pub fn new(step: f64) -> Self {
        Self {
            step: step.clamp(f64::EPSILON, 1.0),
            next_report: 0.0,
            token: None,
            last_progress: None,
        }
    }

    /// Token of the observed run, once assigned.
    pub fn token(&self) -> Option<RunToken> {
        self.token
    }

    /// Most recent progress report.
    pub fn last_progress(&self) -> Option<(usize, f64)> {
        self.last_progress
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl RunObserver for LoggingObserver {
    fn on_process_id_assigned(&mut self, token: RunToken) {
        info!(token = %token, "Projection run started");
        self.token = Some(token);
    }

    fn on_progress(&mut self, valid_count: usize, fraction: f64) {
        self.last_progress = Some((valid_count, fraction));
        if fraction >= self.next_report || fraction >= 1.0 {
            info!(
                valid = valid_count,
                percent = (fraction * 100.0).round(),
                "Progress"
            );
            self.next_report = fraction + self.step;
        }
    }

    fn on_finished(&mut self, result: &ProjectionResult) {
        info!(valid = result.len(), step = result.step, "Projection run finished");
    }
}
