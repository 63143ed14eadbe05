//! Project export orchestration

pub mod coordinator;

pub use coordinator::{ExportCoordinator, DEFAULT_EXPORT_POLL_INTERVAL};
