//! External system integrations for glporter.
//!
//! - [`gitlab`] - GitLab REST API v4 access
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the export and
//! import state machines can be exercised against scripted fakes. The
//! [`gitlab::Transport`] trait is that seam:
//!
//! ```rust,no_run
//! use glporter::adapters::gitlab::{GitLabClient, Transport};
//! use glporter::config::{secret_string, GitLabConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GitLabConfig {
//!     base_url: "https://gitlab.example.com".to_string(),
//!     token: secret_string("glpat-xxxxxxxx".to_string()),
//!     tls_verify: true,
//!     timeout_seconds: 60,
//! };
//!
//! let client = GitLabClient::new(&config)?;
//! let response = client.get("/projects/group%2Fproject/export").await?;
//! println!("{} {}", response.status, response.body);
//! # Ok(())
//! # }
//! ```

pub mod gitlab;
