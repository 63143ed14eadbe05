//! Upload strategy selection for project archives

use crate::config::schema::MIN_LARGE_UPLOAD_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Largest archive sent as a buffered form body (`i32::MAX`)
///
/// Anything strictly larger is streamed, since many servers refuse bodies
/// whose declared length does not fit a signed 32-bit integer.
pub const STREAMING_THRESHOLD_BYTES: u64 = 2_147_483_647;

/// How the archive travels in the import request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStrategy {
    /// Archive read into memory and sent with a declared length
    Form,
    /// Archive streamed from disk without a declared length
    Streamed,
}

impl UploadStrategy {
    pub fn for_size(size_bytes: u64) -> Self {
        if size_bytes > STREAMING_THRESHOLD_BYTES {
            UploadStrategy::Streamed
        } else {
            UploadStrategy::Form
        }
    }
}

impl fmt::Display for UploadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStrategy::Form => write!(f, "form"),
            UploadStrategy::Streamed => write!(f, "streamed"),
        }
    }
}

/// Strategy plus the request timeout that goes with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPlan {
    pub strategy: UploadStrategy,

    /// Per-request override of the client-wide timeout, which also bounds
    /// the time spent sending the body
    pub timeout: Option<Duration>,
}

impl UploadPlan {
    /// Plan the upload of an archive of `size_bytes`
    ///
    /// Both strategies get `large_upload_timeout`, never less than an hour.
    /// A buffered archive can be up to 2 GiB, so it needs the same headroom
    /// as a streamed one.
    pub fn for_size(size_bytes: u64, large_upload_timeout: Duration) -> Self {
        let timeout =
            large_upload_timeout.max(Duration::from_secs(MIN_LARGE_UPLOAD_TIMEOUT_SECS));
        Self {
            strategy: UploadStrategy::for_size(size_bytes),
            timeout: Some(timeout),
        }
    }

    pub fn is_streamed(&self) -> bool {
        self.strategy == UploadStrategy::Streamed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test_case(0, UploadStrategy::Form ; "empty archive")]
    #[test_case(1024, UploadStrategy::Form ; "small archive")]
    #[test_case(2_147_483_646, UploadStrategy::Form ; "just below threshold")]
    #[test_case(2_147_483_647, UploadStrategy::Form ; "at threshold")]
    #[test_case(2_147_483_648, UploadStrategy::Streamed ; "just above threshold")]
    #[test_case(3_000_000_000, UploadStrategy::Streamed ; "three gigabytes")]
    fn test_strategy_for_size(size: u64, expected: UploadStrategy) {
        assert_eq!(UploadStrategy::for_size(size), expected);
    }

    #[test]
    fn test_form_plan_overrides_client_timeout() {
        let plan = UploadPlan::for_size(STREAMING_THRESHOLD_BYTES, HOUR);
        assert_eq!(plan.strategy, UploadStrategy::Form);
        assert!(!plan.is_streamed());
        assert_eq!(plan.timeout, Some(HOUR));

        let plan = UploadPlan::for_size(1024, Duration::from_secs(60));
        assert_eq!(plan.timeout, Some(HOUR));

        let plan = UploadPlan::for_size(1024, Duration::from_secs(7200));
        assert_eq!(plan.timeout, Some(Duration::from_secs(7200)));
    }

    #[test]
    fn test_large_archive_gets_extended_timeout() {
        let plan = UploadPlan::for_size(3_000_000_000, HOUR);
        assert!(plan.is_streamed());
        assert!(plan.timeout.unwrap() >= HOUR);
    }

    #[test]
    fn test_streamed_timeout_never_below_an_hour() {
        let plan = UploadPlan::for_size(STREAMING_THRESHOLD_BYTES + 1, Duration::from_secs(60));
        assert_eq!(plan.timeout, Some(HOUR));

        let plan = UploadPlan::for_size(STREAMING_THRESHOLD_BYTES + 1, Duration::from_secs(7200));
        assert_eq!(plan.timeout, Some(Duration::from_secs(7200)));
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(UploadStrategy::Form.to_string(), "form");
        assert_eq!(UploadStrategy::Streamed.to_string(), "streamed");
    }
}
