//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the glporter configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  GitLab URL: {}", config.gitlab.base_url);
        println!("  TLS Verification: {}", config.gitlab.tls_verify);
        println!("  Request Timeout: {}s", config.gitlab.timeout_seconds);
        println!(
            "  Export Polling: every {}s, give up after {} stalled polls",
            config.export.poll_interval_seconds, config.export.max_stall_retries
        );
        println!(
            "  Import Polling: every {}s, give up after {} failed status replies",
            config.import.poll_interval_seconds, config.import.max_stall_retries
        );
        println!(
            "  Import Deadline: {}",
            config
                .import
                .max_wait_seconds
                .map(|s| format!("{s}s"))
                .unwrap_or_else(|| "none".to_string())
        );
        println!(
            "  Large Upload Timeout: {}s",
            config.import.large_upload_timeout_seconds
        );
        println!("  Listing Membership Only: {}", config.listing.membership);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(0)
    }
}
