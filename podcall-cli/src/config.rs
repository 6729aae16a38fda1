//! Configuration module
//!
//! Holds the endpoint credentials supplied through flags or environment
//! variables and checks them before any request is made.

use podcall_client::{ClientError, EndpointConfig};

/// Base URL of the serverless API; the endpoint id is appended to it
pub const DEFAULT_API_BASE: &str = "https://api.runpod.ai/v2";

/// Values shipped in setup instructions that must be replaced
const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";
const ENDPOINT_ID_PLACEHOLDER: &str = "YOUR_ENDPOINT_ID_HERE";

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// Bearer credential for the endpoint
    pub api_key: Option<String>,
    /// Identifier of the serverless endpoint
    pub endpoint_id: Option<String>,
    /// Base URL of the API
    pub api_base: String,
}

impl Config {
    /// Validates the configuration
    ///
    /// Missing values and untouched placeholders are both rejected.
    pub fn validate(&self) -> Result<(), ClientError> {
        let api_key = self.api_key.as_deref().map(str::trim).unwrap_or_default();
        if api_key.is_empty() || api_key == API_KEY_PLACEHOLDER {
            return Err(ClientError::Configuration(
                "API key is not set (use --api-key or PODCALL_API_KEY)".to_string(),
            ));
        }

        let endpoint_id = self
            .endpoint_id
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if endpoint_id.is_empty() || endpoint_id == ENDPOINT_ID_PLACEHOLDER {
            return Err(ClientError::Configuration(
                "endpoint ID is not set (use --endpoint-id or PODCALL_ENDPOINT_ID)".to_string(),
            ));
        }

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ClientError::Configuration(format!(
                "API base must start with http:// or https://, got '{}'",
                self.api_base
            )));
        }

        Ok(())
    }

    /// Builds the client configuration, validating first
    pub fn endpoint_config(&self) -> Result<EndpointConfig, ClientError> {
        self.validate()?;
        Ok(EndpointConfig::for_endpoint(
            &self.api_base,
            self.endpoint_id().trim(),
            self.api_key.as_deref().unwrap_or_default().trim(),
        ))
    }

    pub fn endpoint_id(&self) -> &str {
        self.endpoint_id.as_deref().unwrap_or_default()
    }

    /// API key with everything but the last 4 characters hidden
    pub fn masked_api_key(&self) -> String {
        let key: Vec<char> = self.api_key.as_deref().unwrap_or_default().chars().collect();
        if key.len() < 4 {
            return "*".repeat(key.len());
        }
        let visible: String = key[key.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(key.len() - 4), visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            api_key: Some("rpa_ABCDEFGH1234".to_string()),
            endpoint_id: Some("abc123".to_string()),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_missing_values_rejected() {
        let mut config = config();
        config.api_key = None;
        assert!(matches!(
            config.validate(),
            Err(ClientError::Configuration(_))
        ));

        let mut config = self::config();
        config.endpoint_id = Some("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_placeholders_rejected() {
        let mut config = config();
        config.api_key = Some(API_KEY_PLACEHOLDER.to_string());
        assert!(config.validate().is_err());

        let mut config = self::config();
        config.endpoint_id = Some(ENDPOINT_ID_PLACEHOLDER.to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_api_base_rejected() {
        let mut config = config();
        config.api_base = "api.runpod.ai/v2".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_config_joins_base_and_id() {
        let endpoint = config().endpoint_config().unwrap();
        assert_eq!(endpoint.base_url, "https://api.runpod.ai/v2/abc123");
        assert_eq!(endpoint.api_key, "rpa_ABCDEFGH1234");
    }

    #[test]
    fn test_masked_api_key() {
        assert_eq!(config().masked_api_key(), "************1234");

        let mut short = config();
        short.api_key = Some("abc".to_string());
        assert_eq!(short.masked_api_key(), "***");
    }
}
