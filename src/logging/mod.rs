//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use glporter::logging::init_logging;
//! use glporter::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(project = "group/app", "Export requested");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a transfer
///
/// # Example
///
/// ```no_run
/// use glporter::log_transfer_start;
///
/// log_transfer_start!("export", "group/app");
/// ```
#[macro_export]
macro_rules! log_transfer_start {
    ($kind:expr, $project:expr) => {
        tracing::info!(
            kind = $kind,
            project = %$project,
            "Starting transfer"
        );
    };
}

/// Log the completion of a transfer
///
/// # Example
///
/// ```no_run
/// use glporter::log_transfer_complete;
/// use std::time::Duration;
///
/// log_transfer_complete!("import", "group/app", Duration::from_secs(42));
/// ```
#[macro_export]
macro_rules! log_transfer_complete {
    ($kind:expr, $project:expr, $duration:expr) => {
        tracing::info!(
            kind = $kind,
            project = %$project,
            duration_ms = $duration.as_millis() as u64,
            "Transfer completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use glporter::log_error_with_context;
/// use glporter::domain::PorterError;
///
/// let error = PorterError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
