use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use thiserror::Error;

pub const DEFAULT_REGION: &str = "eu-west-1";

/// Settings every SDK client is built from. Passed explicitly; nothing here
/// touches process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub region: String,
    /// Overrides the service endpoint, e.g. a LocalStack URL.
    pub endpoint_url: Option<String>,
    pub operation_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            operation_timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("region cannot be empty")]
    EmptyRegion,
    #[error("endpoint url '{0}' must start with http:// or https://")]
    InvalidEndpoint(String),
    #[error("operation timeout must be positive")]
    ZeroTimeout,
}

impl ClientSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::EmptyRegion);
        }

        if let Some(url) = &self.endpoint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidEndpoint(url.clone()));
            }
        }

        if self.operation_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}

pub async fn load_sdk_config(settings: &ClientSettings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.trim().to_string()));

    if let Some(url) = &settings.endpoint_url {
        loader = loader.endpoint_url(url.clone());
    }

    if let Some(timeout) = settings.operation_timeout {
        loader = loader.timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
    }

    loader.load().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_target_eu_west_1() {
        let settings = ClientSettings::default();
        assert_eq!(settings.region, "eu-west-1");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_blank_region() {
        let settings = ClientSettings {
            region: "  ".to_string(),
            ..ClientSettings::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::EmptyRegion));
    }

    #[test]
    fn rejects_endpoint_without_scheme() {
        let settings = ClientSettings {
            endpoint_url: Some("localhost:4566".to_string()),
            ..ClientSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::InvalidEndpoint("localhost:4566".to_string()))
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        let settings = ClientSettings {
            operation_timeout: Some(Duration::ZERO),
            ..ClientSettings::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::ZeroTimeout));
    }
}
