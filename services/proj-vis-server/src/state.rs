//! Application state for the transform service.

/// Largest batch a single request may ask for unless configured otherwise.
pub const DEFAULT_MAX_LIMIT: u64 = 10_000;

/// Service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Largest `limit` a batch request may ask for; larger ones are rejected.
    pub max_limit: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}
