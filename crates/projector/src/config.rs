//! Configuration for projection runs.

use std::time::Duration;

use projvis_common::DEFAULT_BATCH_LIMIT;
use serde::{Deserialize, Serialize};

/// Configuration shared by the driver and the remote client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Grid samples per batch, for both local and remote transforms.
    pub batch_limit: u64,

    /// Timeout for a whole HTTP request to the transform service.
    pub request_timeout: Duration,

    /// Timeout for establishing a connection to the transform service.
    pub connect_timeout: Duration,

    /// Transform service URL. `None` selects local transforms.
    pub server_url: Option<String>,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            batch_limit: DEFAULT_BATCH_LIMIT,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            server_url: None,
        }
    }
}

impl ProjectorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PROJ_VIS_SERVER_URL") {
            config.server_url = normalize_url(&val);
        }

        if let Ok(val) = std::env::var("PROJ_VIS_BATCH_LIMIT") {
            if let Ok(limit) = val.parse() {
                config.batch_limit = limit;
            }
        }

        if let Ok(val) = std::env::var("PROJ_VIS_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(val) = std::env::var("PROJ_VIS_CONNECT_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.connect_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Override the server URL. Blank values select local transforms.
    pub fn with_server_url(mut self, url: Option<&str>) -> Self {
        self.server_url = url.and_then(normalize_url);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_limit == 0 {
            return Err("batch_limit must be > 0".to_string());
        }

        if self.request_timeout.is_zero() {
            return Err("request_timeout must be > 0".to_string());
        }

        if self.connect_timeout.is_zero() {
            return Err("connect_timeout must be > 0".to_string());
        }

        if let Some(url) = &self.server_url {
            reqwest::Url::parse(url).map_err(|e| format!("server_url '{}' is invalid: {}", url, e))?;
        }

        Ok(())
    }
}

fn normalize_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ProjectorConfig::default();
        assert_eq!(config.batch_limit, 1000);
        assert!(config.server_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_server_url_means_local() {
        let config = ProjectorConfig::default().with_server_url(Some("   "));
        assert!(config.server_url.is_none());

        let config = ProjectorConfig::default().with_server_url(Some("http://localhost:7765"));
        assert_eq!(config.server_url.as_deref(), Some("http://localhost:7765"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ProjectorConfig {
            batch_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ProjectorConfig::default().with_server_url(Some("not a url"));
        assert!(config.validate().is_err());
    }
}
