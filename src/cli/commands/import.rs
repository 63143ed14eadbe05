//! Import command implementation
//!
//! Uploads a project archive and waits until GitLab has finished importing
//! it. An existing project at the target path is overwritten.

use super::{connect, parse_project, report};
use crate::core::import::ImportCoordinator;
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Target project path with namespace (e.g. group/subgroup/project)
    pub project: String,

    /// Exported project archive (.tar.gz)
    pub archive: PathBuf,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let project = match parse_project(&self.project) {
            Ok(project) => project,
            Err(code) => return Ok(code),
        };
        let (config, client) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };

        crate::log_transfer_start!("import", project);

        let coordinator =
            ImportCoordinator::from_config(client, &config.import).with_shutdown(shutdown_signal);

        match coordinator.import_project(&project, &self.archive).await {
            Ok(summary) => {
                crate::log_transfer_complete!("import", project, summary.duration);
                println!(
                    "✅ Imported {} ({} bytes, {} upload, {} status polls, {:.1}s)",
                    summary.project,
                    summary.size_bytes,
                    summary.strategy,
                    summary.polls,
                    summary.duration.as_secs_f64()
                );
                Ok(0)
            }
            Err(e) => Ok(report(&e)),
        }
    }
}
