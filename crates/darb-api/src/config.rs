//! # API Client Configuration
//!
//! Where the storefront API lives and who is shopping.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DARB_API_URL=https://api.example.com                               │
//! │     DARB_USER_ID=u-42                                                  │
//! │     DARB_TIMEOUT_SECS=20                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/darb.toml (Linux)                             │
//! │     ~/Library/Application Support/com.darb.storefront/darb.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     production API, 10 s timeout, nobody logged in                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # darb.toml
//! [api]
//! base_url = "https://darbapi-production.up.railway.app"
//! timeout_secs = 10
//!
//! [session]
//! user_id = "u-42"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ApiClientError, ApiResult};

/// Production deployment of the storefront API.
pub const DEFAULT_BASE_URL: &str = "https://darbapi-production.up.railway.app";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "darb.toml";

// =============================================================================
// Sections
// =============================================================================

/// Remote endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; resource paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// The logged-in shopper, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete API client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl ApiConfig {
    /// Configuration pointing at `base_url` with default settings otherwise.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ApiConfig {
            api: ApiSettings {
                base_url: base_url.into(),
                ..ApiSettings::default()
            },
            session: SessionSettings::default(),
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (darb.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading API config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ApiResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ApiClientError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "API config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        let url = self.api.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ApiClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                url
            )));
        }
        url::Url::parse(url)?;

        if self.api.timeout_secs == 0 {
            return Err(ApiClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if let Some(ref id) = self.session.user_id {
            if id.trim().is_empty() {
                return Err(ApiClientError::InvalidConfig("user_id must not be blank".into()));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DARB_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(id) = std::env::var("DARB_USER_ID") {
            debug!(user_id = %id, "Overriding user from environment");
            self.session.user_id = Some(id);
        }

        if let Ok(timeout) = std::env::var("DARB_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric DARB_TIMEOUT_SECS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "darb", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url.trim()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.user_id.as_deref()
    }
}
