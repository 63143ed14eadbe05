//! Domain models and types for glporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Project identifier** ([`ProjectPath`]) with the URL encoding GitLab expects
//! - **Remote status types** ([`ExportStatus`], [`ImportStatus`], [`DownloadLinks`])
//! - **Error types** ([`PorterError`], [`GitLabError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PorterError>`]:
//!
//! ```rust
//! use glporter::domain::{ProjectPath, PorterError, Result};
//!
//! fn parse(raw: &str) -> Result<ProjectPath> {
//!     ProjectPath::new(raw).map_err(PorterError::Validation)
//! }
//! # assert!(parse("group/project").is_ok());
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod status;

// Re-export commonly used types for convenience
pub use errors::{GitLabError, PorterError};
pub use ids::ProjectPath;
pub use result::Result;
pub use status::{DownloadLinks, ExportStatus, ImportStatus};
