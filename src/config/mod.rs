//! Configuration management for glporter.
//!
//! # Overview
//!
//! glporter reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GLPORTER_<SECTION>_<KEY>` overrides
//! - Default values for everything but the GitLab URL and token
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use glporter::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("glporter.toml")?;
//! println!("GitLab: {}", config.gitlab.base_url);
//! println!("Export poll interval: {:?}", config.export.poll_interval());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [gitlab]
//! base_url = "https://gitlab.example.com"
//! token = "${GITLAB_TOKEN}"
//! tls_verify = true
//!
//! [export]
//! max_stall_retries = 10
//! poll_interval_seconds = 5
//!
//! [import]
//! poll_interval_seconds = 1
//! large_upload_timeout_seconds = 3600
//! # max_wait_seconds = 7200
//!
//! [listing]
//! membership = true
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ExportConfig, GitLabConfig, ImportConfig, ListingConfig, LoggingConfig,
    PorterConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
