//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geo-lookup/config.toml

pub mod defaults;

use crate::constants::api::*;
use crate::constants::http::*;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output and provider defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// HTTP client settings shared by all providers
    #[serde(default)]
    pub http: HttpConfig,

    /// Nominatim settings
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// Provider base URLs
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Output and provider defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Default IP geolocation provider
    #[serde(default = "default_ip_provider")]
    pub ip_provider: String,

    /// Default language for Google geocoding
    #[serde(default = "default_language")]
    pub language: String,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Request timeout for ipstack in seconds
    #[serde(default = "default_ipstack_timeout")]
    pub ipstack_timeout_secs: u64,
}

/// Nominatim settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL
    #[serde(default = "default_nominatim_url")]
    pub url: String,

    /// Delay before every request in milliseconds
    #[serde(default = "default_nominatim_delay")]
    pub request_delay_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_nominatim_timeout")]
    pub timeout_secs: u64,
}

/// Provider base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_google_url")]
    pub google: String,

    #[serde(default = "default_ipstack_url")]
    pub ipstack: String,

    #[serde(default = "default_ipapi_url")]
    pub ipapi: String,

    #[serde(default = "default_rapidapi_url")]
    pub rapidapi: String,

    /// Value of the `x-rapidapi-host` header
    #[serde(default = "default_rapidapi_host")]
    pub rapidapi_host: String,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Google Geocoding API key
    #[serde(default)]
    pub google: String,

    /// ipstack access key
    #[serde(default)]
    pub ipstack: String,

    /// RapidAPI key
    #[serde(default)]
    pub rapidapi: String,
}

// Default value functions for serde
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_ip_provider() -> String {
    DEFAULT_IP_PROVIDER.to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_ipstack_timeout() -> u64 {
    IPSTACK_TIMEOUT_SECS
}
fn default_nominatim_url() -> String {
    NOMINATIM_URL.to_string()
}
fn default_nominatim_delay() -> u64 {
    NOMINATIM_DELAY_MS
}
fn default_nominatim_timeout() -> u64 {
    NOMINATIM_TIMEOUT_SECS
}
fn default_google_url() -> String {
    GOOGLE_GEOCODE_URL.to_string()
}
fn default_ipstack_url() -> String {
    IPSTACK_URL.to_string()
}
fn default_ipapi_url() -> String {
    IPAPI_URL.to_string()
}
fn default_rapidapi_url() -> String {
    RAPIDAPI_URL.to_string()
}
fn default_rapidapi_host() -> String {
    RAPIDAPI_HOST.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            ip_provider: default_ip_provider(),
            language: default_language(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            ipstack_timeout_secs: default_ipstack_timeout(),
        }
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            url: default_nominatim_url(),
            request_delay_ms: default_nominatim_delay(),
            timeout_secs: default_nominatim_timeout(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            google: default_google_url(),
            ipstack: default_ipstack_url(),
            ipapi: default_ipapi_url(),
            rapidapi: default_rapidapi_url(),
            rapidapi_host: default_rapidapi_host(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),
            ["defaults", "ip_provider"] => Some(self.defaults.ip_provider.clone()),
            ["defaults", "language"] => Some(self.defaults.language.clone()),

            ["http", "user_agent"] => Some(self.http.user_agent.clone()),
            ["http", "timeout_secs"] => Some(self.http.timeout_secs.to_string()),
            ["http", "ipstack_timeout_secs"] => Some(self.http.ipstack_timeout_secs.to_string()),

            ["nominatim", "url"] => Some(self.nominatim.url.clone()),
            ["nominatim", "request_delay_ms"] => Some(self.nominatim.request_delay_ms.to_string()),
            ["nominatim", "timeout_secs"] => Some(self.nominatim.timeout_secs.to_string()),

            ["endpoints", "google"] => Some(self.endpoints.google.clone()),
            ["endpoints", "ipstack"] => Some(self.endpoints.ipstack.clone()),
            ["endpoints", "ipapi"] => Some(self.endpoints.ipapi.clone()),
            ["endpoints", "rapidapi"] => Some(self.endpoints.rapidapi.clone()),
            ["endpoints", "rapidapi_host"] => Some(self.endpoints.rapidapi_host.clone()),

            ["api_keys", "google"] => Some(self.api_keys.google.clone()),
            ["api_keys", "ipstack"] => Some(self.api_keys.ipstack.clone()),
            ["api_keys", "rapidapi"] => Some(self.api_keys.rapidapi.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        let parse_u64 = |what: &str| -> Result<u64> {
            value
                .parse()
                .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
        };
        let parse_timeout = || -> Result<u64> {
            match parse_u64("timeout")? {
                0 => Err(Error::Config("Timeout must be at least 1 second".to_string())),
                secs => Ok(secs),
            }
        };

        match parts.as_slice() {
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }
            ["defaults", "ip_provider"] => {
                value
                    .parse::<crate::geo::IpProvider>()
                    .map_err(Error::Config)?;
                self.defaults.ip_provider = value.to_string();
            }
            ["defaults", "language"] => {
                self.defaults.language = value.to_string();
            }

            ["http", "user_agent"] => {
                self.http.user_agent = value.to_string();
            }
            ["http", "timeout_secs"] => {
                self.http.timeout_secs = parse_timeout()?;
            }
            ["http", "ipstack_timeout_secs"] => {
                self.http.ipstack_timeout_secs = parse_timeout()?;
            }

            ["nominatim", "url"] => {
                self.nominatim.url = value.to_string();
            }
            ["nominatim", "request_delay_ms"] => {
                self.nominatim.request_delay_ms = parse_u64("delay")?;
            }
            ["nominatim", "timeout_secs"] => {
                self.nominatim.timeout_secs = parse_timeout()?;
            }

            ["endpoints", "google"] => {
                self.endpoints.google = value.to_string();
            }
            ["endpoints", "ipstack"] => {
                self.endpoints.ipstack = value.to_string();
            }
            ["endpoints", "ipapi"] => {
                self.endpoints.ipapi = value.to_string();
            }
            ["endpoints", "rapidapi"] => {
                self.endpoints.rapidapi = value.to_string();
            }
            ["endpoints", "rapidapi_host"] => {
                self.endpoints.rapidapi_host = value.to_string();
            }

            ["api_keys", "google"] => {
                self.api_keys.google = value.to_string();
            }
            ["api_keys", "ipstack"] => {
                self.api_keys.ipstack = value.to_string();
            }
            ["api_keys", "rapidapi"] => {
                self.api_keys.rapidapi = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "defaults.ip_provider",
            "defaults.language",
            "http.user_agent",
            "http.timeout_secs",
            "http.ipstack_timeout_secs",
            "nominatim.url",
            "nominatim.request_delay_ms",
            "nominatim.timeout_secs",
            "endpoints.google",
            "endpoints.ipstack",
            "endpoints.ipapi",
            "endpoints.rapidapi",
            "endpoints.rapidapi_host",
            "api_keys.google",
            "api_keys.ipstack",
            "api_keys.rapidapi",
        ]
    }

    /// True for keys whose values must not be echoed
    pub fn is_secret_key(key: &str) -> bool {
        key.starts_with("api_keys.")
    }

    /// Delay before each Nominatim request
    pub fn nominatim_delay(&self) -> Duration {
        Duration::from_millis(self.nominatim.request_delay_ms)
    }

    /// Nominatim request timeout
    pub fn nominatim_timeout(&self) -> Duration {
        Duration::from_secs(self.nominatim.timeout_secs)
    }

    /// Default request timeout
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// ipstack request timeout
    pub fn ipstack_timeout(&self) -> Duration {
        Duration::from_secs(self.http.ipstack_timeout_secs)
    }
}

/// Mask a secret for display
pub fn mask(value: &str) -> &'static str {
    if value.is_empty() {
        "\"\" # not configured"
    } else {
        "\"***\" # configured"
    }
}
