use crate::error::ConfigError;
use crate::render::RenderFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Environment variable overriding the backend base URL
pub const BACKEND_URL_ENV: &str = "SCOUT_BACKEND_URL";

/// Environment variable overriding the WebDriver URL
pub const WEBDRIVER_URL_ENV: &str = "WEBDRIVER_URL";

/// Configuration for a scout run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Base URL of the recommendation backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Optional deadline for the backend request, in seconds; unset means none
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Output format for recommendations
    #[serde(default)]
    pub format: RenderFormat,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            webdriver_url: default_webdriver_url(),
            request_timeout_secs: None,
            format: RenderFormat::default(),
        }
    }
}

impl ScoutConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply non-empty environment overrides
    pub fn apply_env(self) -> Self {
        self.apply_overrides(
            std::env::var(BACKEND_URL_ENV).ok(),
            std::env::var(WEBDRIVER_URL_ENV).ok(),
        )
    }

    /// Replace URLs with the given values, ignoring missing or empty ones
    pub fn apply_overrides(
        mut self,
        backend_url: Option<String>,
        webdriver_url: Option<String>,
    ) -> Self {
        if let Some(url) = backend_url.filter(|url| !url.is_empty()) {
            self.backend_url = url;
        }
        if let Some(url) = webdriver_url.filter(|url| !url.is_empty()) {
            self.webdriver_url = url;
        }
        self
    }

    /// Check that every URL in the configuration parses
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("backend_url", &self.backend_url),
            ("webdriver_url", &self.webdriver_url),
        ] {
            Url::parse(value).map_err(|source| ConfigError::Url {
                field,
                value: value.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Default backend: a local development server
fn default_backend_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}
