//! Credential and endpoint configuration.
//!
//! The config file format is picked from the extension: `.json`, `.toml`, and
//! anything else is read as YAML.

use crate::error::{PresenceError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// ADS search endpoint
pub const ADS_API_URL: &str = "https://api.adsabs.harvard.edu/v1/search/query";

/// Google Programmable Search endpoint
pub const GOOGLE_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

const DEFAULT_ADS_DELAY_MS: u64 = 200;
const DEFAULT_GOOGLE_DELAY_MS: u64 = 1000;

/// Opaque credential strings, passed explicitly to each client.
#[derive(Clone, Default)]
pub struct Credentials {
    /// ADS bearer token
    pub ads_token: String,
    /// Google search API key and engine id, absent when search is not configured
    pub google: Option<GoogleCredentials>,
}

/// Google Programmable Search credentials
#[derive(Clone)]
pub struct GoogleCredentials {
    pub api_key: String,
    pub cx: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ads_token", &"<redacted>")
            .field("google", &self.google)
            .finish()
    }
}

impl fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleCredentials")
            .field("api_key", &"<redacted>")
            .field("cx", &self.cx)
            .finish()
    }
}

/// Validated settings loaded from the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub ads_api_url: Url,
    pub google_api_url: Url,
    /// Pause after each successful ADS call
    pub ads_delay: Duration,
    /// Pause after each successful Google call
    pub google_delay: Duration,
}

/// On-disk shape of the config file
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    ads_token: Option<String>,
    #[serde(default)]
    google_api_key: Option<String>,
    #[serde(default)]
    google_cx: Option<String>,
    #[serde(default)]
    ads_api_url: Option<String>,
    #[serde(default)]
    google_api_url: Option<String>,
    #[serde(default)]
    ads_delay_ms: Option<u64>,
    #[serde(default)]
    google_delay_ms: Option<u64>,
}

/// Load and validate settings from a JSON, TOML or YAML file.
pub fn load_config(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(PresenceError::Config(format!(
            "config file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    debug!(path = %path.display(), format = %extension, "Parsing config");

    let raw: RawConfig = match extension.as_str() {
        "json" => serde_json::from_str(&content)?,
        "toml" => toml::from_str(&content)
            .map_err(|e| PresenceError::Config(format!("invalid TOML: {}", e)))?,
        _ => serde_yaml::from_str(&content)
            .map_err(|e| PresenceError::Config(format!("invalid YAML: {}", e)))?,
    };

    raw.validate()
}

impl RawConfig {
    fn validate(self) -> Result<Settings> {
        let ads_token = non_empty(self.ads_token).ok_or_else(|| {
            PresenceError::Config("missing required field 'ads_token'".to_string())
        })?;

        let google = match (non_empty(self.google_api_key), non_empty(self.google_cx)) {
            (Some(api_key), Some(cx)) => Some(GoogleCredentials { api_key, cx }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(PresenceError::Config(
                    "'google_api_key' is set but 'google_cx' is missing".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(PresenceError::Config(
                    "'google_cx' is set but 'google_api_key' is missing".to_string(),
                ))
            }
        };

        Ok(Settings {
            credentials: Credentials { ads_token, google },
            ads_api_url: parse_endpoint("ads_api_url", self.ads_api_url, ADS_API_URL)?,
            google_api_url: parse_endpoint("google_api_url", self.google_api_url, GOOGLE_API_URL)?,
            ads_delay: Duration::from_millis(self.ads_delay_ms.unwrap_or(DEFAULT_ADS_DELAY_MS)),
            google_delay: Duration::from_millis(
                self.google_delay_ms.unwrap_or(DEFAULT_GOOGLE_DELAY_MS),
            ),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_endpoint(field: &str, value: Option<String>, default: &str) -> Result<Url> {
    let raw = non_empty(value).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| PresenceError::Config(format!("invalid '{}': {}", field, e)))
}
