//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod import;
pub mod list;
pub mod validate;

use crate::adapters::gitlab::GitLabClient;
use crate::config::{load_config, PorterConfig};
use crate::domain::{PorterError, ProjectPath};
use std::sync::Arc;

/// Load the configuration and build a client, or the exit code to stop with
fn connect(config_path: &str) -> Result<(PorterConfig, Arc<GitLabClient>), i32> {
    let config = load_config(config_path).map_err(|e| report(&e))?;
    let client = GitLabClient::new(&config.gitlab).map_err(|e| report(&e))?;
    Ok((config, Arc::new(client)))
}

fn parse_project(raw: &str) -> Result<ProjectPath, i32> {
    raw.parse::<ProjectPath>()
        .map_err(|e| report(&PorterError::Validation(e)))
}

/// Log and print an error, returning its exit code
fn report(error: &PorterError) -> i32 {
    crate::log_error_with_context!(error, "Command failed");
    if let Some(status) = http_status(error) {
        tracing::debug!(status, "Last GitLab reply status");
    }
    eprintln!("❌ {error}");
    super::exit_code_for(error)
}

fn http_status(error: &PorterError) -> Option<u16> {
    match error {
        PorterError::GitLab(e) => e.status(),
        _ => None,
    }
}
