//! GitLab adapter implementation
//!
//! This module provides the integration with the GitLab REST API v4: the
//! `Transport` seam the coordinators depend on, the reqwest-backed client,
//! and the wire payload models.

pub mod client;
pub mod models;
pub mod transport;

pub use client::{GitLabClient, PROJECTS_PER_PAGE};
pub use models::{ExportStatusPayload, ImportStatusPayload, ProjectSummary};
pub use transport::{ApiResponse, MultipartUpload, Transport};
