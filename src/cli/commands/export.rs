//! Export command implementation
//!
//! Runs a project export to completion and prints the download links as
//! JSON on stdout, so the output can be piped to a downloader.

use super::{connect, parse_project, report};
use crate::core::export::ExportCoordinator;
use clap::Args;
use std::time::Instant;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project path with namespace (e.g. group/subgroup/project)
    pub project: String,

    /// Consecutive polls without progress tolerated (defaults to export.max_stall_retries)
    #[arg(long, value_name = "N")]
    pub max_stall_retries: Option<u32>,
}

impl ExportArgs {
    /// Execute the export command
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

        let max_stall_retries = self
            .max_stall_retries
            .unwrap_or(config.export.max_stall_retries);

        crate::log_transfer_start!("export", project);
        let started = Instant::now();

        let coordinator = ExportCoordinator::new(client)
            .with_poll_interval(config.export.poll_interval())
            .with_shutdown(shutdown_signal);

        match coordinator.export_project(&project, max_stall_retries).await {
            Ok(links) => {
                crate::log_transfer_complete!("export", project, started.elapsed());
                println!("{}", serde_json::to_string_pretty(&links)?);
                Ok(0)
            }
            Err(e) => Ok(report(&e)),
        }
    }
}
