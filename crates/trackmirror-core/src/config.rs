use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Environment variable that overrides `server.base_url`.
pub const SERVER_URL_ENV: &str = "TRACKMIRROR_SERVER_URL";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Import/sync server settings
    pub server: ServerConfig,

    /// UI timing preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the import/sync server (the four POST endpoints hang off it)
    pub base_url: String,

    /// Optional request timeout in seconds.
    ///
    /// Unset by default: a request waits until the transport itself resolves.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Delay before the sync-all trigger is re-enabled (milliseconds)
    #[serde(default = "default_sync_cooldown_ms")]
    pub sync_cooldown_ms: u64,

    /// Lifetime of a transient notification (seconds)
    #[serde(default = "default_notification_ttl_secs")]
    pub notification_ttl_secs: u64,
}

fn default_sync_cooldown_ms() -> u64 {
    2000
}

fn default_notification_ttl_secs() -> u64 {
    5
}

impl UiConfig {
    pub fn sync_cooldown(&self) -> Duration {
        Duration::from_millis(self.sync_cooldown_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_secs)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sync_cooldown_ms: default_sync_cooldown_ms(),
            notification_ttl_secs: default_notification_ttl_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trackmirror");

        Self {
            config_dir,
            server: ServerConfig {
                base_url: "http://localhost:5000".to_string(),
                request_timeout_secs: None,
            },
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist.
    ///
    /// `TRACKMIRROR_SERVER_URL` takes precedence over the stored base URL.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            config
        } else {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            Self::from_toml(&contents)?
        };

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            tracing::info!("Using server URL from {}", SERVER_URL_ENV);
            config.server.base_url = url;
        }

        Ok(config)
    }

    /// Parse a configuration document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config file")
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.server.base_url, "server.base_url", &mut result);

        if self.server.request_timeout_secs == Some(0) {
            result.add_error(
                "server.request_timeout_secs",
                "Timeout must be greater than 0 (omit it to wait indefinitely)",
            );
        }

        if self.ui.sync_cooldown_ms == 0 {
            result.add_warning(
                "ui.sync_cooldown_ms",
                "Sync cool-down disabled; the sync trigger re-enables immediately",
            );
        } else if self.ui.sync_cooldown_ms > 60_000 {
            result.add_warning("ui.sync_cooldown_ms", "Sync cool-down is longer than a minute");
        }

        if self.ui.notification_ttl_secs == 0 {
            result.add_warning(
                "ui.notification_ttl_secs",
                "Notifications expire immediately (0 seconds)",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("trackmirror");

        Ok(config_dir.join("config.toml"))
    }
}
