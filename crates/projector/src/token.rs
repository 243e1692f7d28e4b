//! Run tokens and the shared current-run register.
//!
//! Starting a run overwrites the register with a fresh token. Older runs
//! compare their own token against the register at every suspension point
//! and stop once it no longer matches.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

/// Identifier of one projection run.
///
/// Derived from wall-clock milliseconds and strictly increasing within a
/// register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RunToken(u64);

impl RunToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single-slot register holding the token of the current run.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct RunRegister {
    // 0 means no run has started.
    current: Arc<AtomicU64>,
}

impl RunRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new token and make it current, superseding any running run.
    pub fn begin(&self) -> RunToken {
        let now = Utc::now().timestamp_millis().max(1) as u64;
        let next = |prev: u64| now.max(prev + 1);

        // The closure never returns None, so both arms carry the previous value.
        let prev = match self
            .current
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(next(prev)))
        {
            Ok(prev) | Err(prev) => prev,
        };

        RunToken(next(prev))
    }

    /// The token of the most recently started run.
    pub fn current(&self) -> Option<RunToken> {
        match self.current.load(Ordering::SeqCst) {
            0 => None,
            value => Some(RunToken(value)),
        }
    }

    /// Whether `token` still belongs to the current run.
    pub fn is_current(&self, token: RunToken) -> bool {
        self.current.load(Ordering::SeqCst) == token.0
    }
}
