//! Advisory validation of projection definitions.

use tracing::{debug, instrument};

use crate::config::ProjectorConfig;
use crate::provider::{LocalProvider, RemoteProvider, TransformProvider, Validation};
use crate::remote::RemoteClient;

/// Check that `definition` can transform `(0, 0)`, locally or through the
/// transform service at `endpoint`.
///
/// Never fails: every problem, including an unreachable service, is
/// reported as an invalid [`Validation`] with a message.
#[instrument(skip(config))]
pub async fn validate(
    definition: &str,
    endpoint: Option<&str>,
    config: &ProjectorConfig,
) -> Validation {
    let validation = match endpoint {
        None => match LocalProvider::from_definition(definition) {
            Ok(provider) => provider.validate().await,
            Err(e) => Validation::invalid(e.to_string()),
        },
        Some(url) => match RemoteClient::new(url, config) {
            Ok(client) => RemoteProvider::new(client, definition).validate().await,
            Err(e) => Validation::invalid(e.to_string()),
        },
    };

    debug!(valid = validation.valid, message = ?validation.message, "Validated projection");
    validation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_valid() {
        let validation = validate("+proj=utm +zone=32", None, &ProjectorConfig::default()).await;
        assert_eq!(validation, Validation::valid());
    }

    #[tokio::test]
    async fn test_local_invalid_has_message() {
        let validation = validate("+proj=bogus", None, &ProjectorConfig::default()).await;
        assert!(!validation.valid);
        assert!(validation.message.unwrap().contains("+proj=bogus"));
    }

    #[tokio::test]
    async fn test_bad_endpoint_is_reported_not_raised() {
        let validation = validate(
            "+proj=longlat",
            Some("::not a url::"),
            &ProjectorConfig::default(),
        )
        .await;
        assert!(!validation.valid);
        assert!(validation.message.is_some());
    }
}
