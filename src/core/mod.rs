//! Core transfer logic for glporter.
//!
//! GitLab runs exports and imports asynchronously: a request only schedules
//! the work, and its status must be polled until it settles. This module
//! turns that into a single awaitable call per project.
//!
//! # Modules
//!
//! - [`polling`] - Fixed-interval polling with a progress-reset stall budget
//! - [`export`] - Export submission and download link extraction
//! - [`import`] - Archive upload (buffered or streamed) and import tracking
//!
//! # Example
//!
//! ```rust,no_run
//! use glporter::adapters::gitlab::GitLabClient;
//! use glporter::config::load_config;
//! use glporter::core::export::ExportCoordinator;
//! use glporter::core::import::ImportCoordinator;
//! use glporter::domain::ProjectPath;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("glporter.toml")?;
//! let client = Arc::new(GitLabClient::new(&config.gitlab)?);
//! let project: ProjectPath = "group/app".parse()?;
//!
//! let links = ExportCoordinator::new(client.clone())
//!     .with_poll_interval(config.export.poll_interval())
//!     .export_project(&project, config.export.max_stall_retries)
//!     .await?;
//! println!("Download: {:?}", links.api_url());
//!
//! let summary = ImportCoordinator::from_config(client, &config.import)
//!     .import_project(&project, Path::new("app.tar.gz"))
//!     .await?;
//! println!("Imported via {} upload", summary.strategy);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod import;
pub mod polling;

#[cfg(test)]
pub(crate) mod testing;
