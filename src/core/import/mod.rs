//! Project import orchestration
//!
//! - [`upload`] - Size-based choice between buffered and streamed uploads
//! - [`coordinator`] - Upload submission and status polling

pub mod coordinator;
pub mod upload;

pub use coordinator::{ImportCoordinator, ImportSummary};
pub use upload::{UploadPlan, UploadStrategy, STREAMING_THRESHOLD_BYTES};
