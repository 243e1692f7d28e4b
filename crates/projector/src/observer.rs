//! Callbacks fired by a projection run.

use crate::driver::ProjectionResult;
use crate::token::RunToken;

/// Receives the events of one run, in order:
/// `on_process_id_assigned`, `on_progress` (one or more), `on_finished`.
///
/// A rejected run fires nothing. A cancelled or failed run never fires
/// `on_finished`.
pub trait RunObserver: Send {
    fn on_process_id_assigned(&mut self, _token: RunToken) {}

    /// `valid_count` is the number of valid samples accumulated so far,
    /// `fraction` the share of the grid processed, in `[0, 1]`.
    fn on_progress(&mut self, _valid_count: usize, _fraction: f64) {}

    fn on_finished(&mut self, _result: &ProjectionResult) {}
}

/// Observer that ignores every event.
impl RunObserver for () {}
