// glporter - GitLab project export/import driver
// Copyright (c) 2025 glporter Contributors
// Licensed under the MIT License

//! # glporter - GitLab project export/import driver
//!
//! glporter turns GitLab's asynchronous project export and import endpoints
//! into single blocking operations with bounded, progress-aware waiting.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Exporting** a project and extracting its archive download links
//! - **Importing** an archive, streaming uploads above 2 GiB
//! - **Listing** projects by path pattern, with a per-client cache
//!
//! ## Architecture
//!
//! glporter follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Polling loop and transfer coordinators
//! - [`adapters`] - GitLab REST transport
//! - [`domain`] - Project paths, statuses and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glporter::adapters::gitlab::GitLabClient;
//! use glporter::config::load_config;
//! use glporter::core::export::ExportCoordinator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("glporter.toml")?;
//!     let client = Arc::new(GitLabClient::new(&config.gitlab)?);
//!
//!     let links = ExportCoordinator::new(client)
//!         .export_project(&"group/app".parse()?, config.export.max_stall_retries)
//!         .await?;
//!
//!     println!("Archive ready at {:?}", links.api_url());
//!     Ok(())
//! }
//! ```
//!
//! ## Waiting Policy
//!
//! Status polls that show named progress (`queued`, `started`, ...) restore
//! the full retry budget, so a long but healthy export is never abandoned.
//! Only an unbroken run of unreadable or unexpected replies gives up.
//!
//! ## Error Handling
//!
//! Every fallible call returns [`domain::Result`]. GitLab-side failures
//! carry the HTTP status and raw response body:
//!
//! ```rust,no_run
//! use glporter::domain::{GitLabError, PorterError};
//!
//! fn describe(err: &PorterError) -> String {
//!     match err {
//!         PorterError::GitLab(GitLabError::Rejected { status, body, .. }) => {
//!             format!("rejected with {status}: {body}")
//!         }
//!         other => other.to_string(),
//!     }
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
