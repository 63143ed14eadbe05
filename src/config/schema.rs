//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `glporter.toml`.

use crate::config::{secret_string, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest accepted timeout for streamed uploads, in seconds
pub const MIN_LARGE_UPLOAD_TIMEOUT_SECS: u64 = 3600;

/// Main glporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PorterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// GitLab server connection
    pub gitlab: GitLabConfig,

    /// Export polling settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Import upload and polling settings
    #[serde(default)]
    pub import: ImportConfig,

    /// Project listing settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PorterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.gitlab.validate()?;
        self.export.validate()?;
        self.import.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// GitLab server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabConfig {
    /// Base URL of the GitLab instance, without the `/api/v4` suffix
    pub base_url: String,

    /// Personal or project access token sent as `PRIVATE-TOKEN`
    /// Stored securely in memory and automatically zeroized on drop
    pub token: SecretString,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Disabling TLS verification exposes the token to
    /// man-in-the-middle attacks. Only turn it off against test instances
    /// with self-signed certificates.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Default request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl GitLabConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("gitlab.base_url cannot be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("gitlab.base_url is not a valid URL: {e}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("gitlab.base_url must start with http:// or https://".to_string());
        }

        if self.token.expose_secret().is_empty() {
            return Err("gitlab.token cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("gitlab.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gitlab.com".to_string(),
            token: secret_string(String::new()),
            tls_verify: true,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Consecutive stalled polls tolerated before giving up
    #[serde(default = "default_max_stall_retries")]
    pub max_stall_retries: u32,

    /// Seconds between export status polls
    #[serde(default = "default_export_poll_interval_seconds")]
    pub poll_interval_seconds: u64,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_stall_retries == 0 {
            return Err("export.max_stall_retries must be > 0".to_string());
        }

        if self.poll_interval_seconds == 0 {
            return Err("export.poll_interval_seconds must be > 0".to_string());
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_stall_retries: default_max_stall_retries(),
            poll_interval_seconds: default_export_poll_interval_seconds(),
        }
    }
}

/// Import configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Seconds between import status polls
    #[serde(default = "default_import_poll_interval_seconds")]
    pub poll_interval_seconds: u64,

    /// Consecutive non-200 status replies tolerated before giving up.
    /// Import status values themselves never count against this budget.
    #[serde(default = "default_max_stall_retries")]
    pub max_stall_retries: u32,

    /// Request timeout for streamed uploads of archives above 2 GiB
    #[serde(default = "default_large_upload_timeout_seconds")]
    pub large_upload_timeout_seconds: u64,

    /// Optional cap on total import polling time. Unbounded when unset.
    #[serde(default)]
    pub max_wait_seconds: Option<u64>,
}

impl ImportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.poll_interval_seconds == 0 {
            return Err("import.poll_interval_seconds must be > 0".to_string());
        }

        if self.max_stall_retries == 0 {
            return Err("import.max_stall_retries must be > 0".to_string());
        }

        if self.large_upload_timeout_seconds < MIN_LARGE_UPLOAD_TIMEOUT_SECS {
            return Err(format!(
                "import.large_upload_timeout_seconds must be >= {MIN_LARGE_UPLOAD_TIMEOUT_SECS}, got {}",
                self.large_upload_timeout_seconds
            ));
        }

        if self.max_wait_seconds == Some(0) {
            return Err("import.max_wait_seconds must be > 0 when set".to_string());
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn large_upload_timeout(&self) -> Duration {
        Duration::from_secs(self.large_upload_timeout_seconds)
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_seconds.map(Duration::from_secs)
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_import_poll_interval_seconds(),
            max_stall_retries: default_max_stall_retries(),
            large_upload_timeout_seconds: default_large_upload_timeout_seconds(),
            max_wait_seconds: None,
        }
    }
}

/// Project listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Only list projects the token's user is a member of
    #[serde(default = "default_true")]
    pub membership: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            membership: default_true(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging next to the console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_stall_retries() -> u32 {
    10
}

fn default_export_poll_interval_seconds() -> u64 {
    5
}

fn default_import_poll_interval_seconds() -> u64 {
    1
}

fn default_large_upload_timeout_seconds() -> u64 {
    MIN_LARGE_UPLOAD_TIMEOUT_SECS
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PorterConfig {
        PorterConfig {
            application: ApplicationConfig::default(),
            gitlab: GitLabConfig {
                base_url: "https://gitlab.example.com".to_string(),
                token: secret_string("glpat-test".to_string()),
                ..Default::default()
            },
            export: ExportConfig::default(),
            import: ImportConfig::default(),
            listing: ListingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_defaults_match_polling_cadence() {
        let config = valid_config();
        assert_eq!(config.export.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.import.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.import.large_upload_timeout(), Duration::from_secs(3600));
        assert!(config.import.max_wait().is_none());
        assert!(config.listing.membership);
        assert!(config.gitlab.tls_verify);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_base_url_must_be_http() {
        let mut config = valid_config();
        config.gitlab.base_url = "ftp://gitlab.example.com".to_string();
        assert!(config.validate().is_err());

        config.gitlab.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut config = valid_config();
        config.gitlab.token = secret_string(String::new());
        let err = config.validate().unwrap_err();
        assert!(err.contains("gitlab.token"));
    }

    #[test]
    fn test_zero_stall_retries_rejected() {
        let mut config = valid_config();
        config.export.max_stall_retries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_large_upload_timeout_floor() {
        let mut config = valid_config();
        config.import.large_upload_timeout_seconds = 600;
        let err = config.validate().unwrap_err();
        assert!(err.contains("large_upload_timeout_seconds"));
    }

    #[test]
    fn test_zero_max_wait_rejected() {
        let mut config = valid_config();
        config.import.max_wait_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = valid_config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
