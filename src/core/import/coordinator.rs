//! Import coordinator - uploads an archive and waits for GitLab to ingest it

use super::upload::{UploadPlan, UploadStrategy};
use crate::adapters::gitlab::{ApiResponse, ImportStatusPayload, MultipartUpload, Transport};
use crate::config::ImportConfig;
use crate::core::polling::{PollOutcome, PollPolicy, PollingLoop};
use crate::domain::{GitLabError, ImportStatus, PorterError, ProjectPath, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Result of a completed import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub project: ProjectPath,

    pub strategy: UploadStrategy,

    /// Archive size in bytes
    pub size_bytes: u64,

    /// Status requests issued until `finished`
    pub polls: u32,

    pub duration: Duration,
}

/// Import coordinator
///
/// Import status values never count as stalls: anything that is not
/// `finished` or `failed` keeps the loop waiting. Only non-200 status
/// replies consume the budget, and `max_wait` (when set) bounds the total.
pub struct ImportCoordinator<T: Transport> {
    transport: Arc<T>,
    policy: PollPolicy,
    large_upload_timeout: Duration,
    shutdown: Option<watch::Receiver<bool>>,
}

impl<T: Transport> ImportCoordinator<T> {
    /// Create a coordinator with default cadence and limits
    pub fn new(transport: Arc<T>) -> Self {
        Self::from_config(transport, &ImportConfig::default())
    }

    pub fn from_config(transport: Arc<T>, config: &ImportConfig) -> Self {
        Self {
            transport,
            policy: PollPolicy::new(config.poll_interval(), config.max_stall_retries)
                .with_max_wait(config.max_wait()),
            large_upload_timeout: config.large_upload_timeout(),
            shutdown: None,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.policy.interval = poll_interval;
        self
    }

    /// Stop polling as soon as `shutdown` turns `true`
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Import `archive` as `project`, overwriting any existing project there
    ///
    /// # Errors
    ///
    /// - [`PorterError::Validation`] if `archive` is not a regular file
    /// - [`GitLabError::Rejected`] if the upload is not accepted
    /// - [`GitLabError::OperationFailed`] if GitLab reports the import failed
    /// - [`GitLabError::StallLimitReached`] after too many non-200 status replies
    /// - [`GitLabError::DeadlineExceeded`] if `max_wait` elapses first
    /// - [`GitLabError::ConnectionFailed`] on any transport failure
    pub async fn import_project(&self, project: &ProjectPath, archive: &Path) -> Result<ImportSummary> {
        let started = std::time::Instant::now();

        let metadata = tokio::fs::metadata(archive).await.map_err(|e| {
            PorterError::Io(format!("Cannot read archive {}: {e}", archive.display()))
        })?;
        if !metadata.is_file() {
            return Err(PorterError::Validation(format!(
                "Archive {} is not a regular file",
                archive.display()
            )));
        }

        let size_bytes = metadata.len();
        let plan = UploadPlan::for_size(size_bytes, self.large_upload_timeout);
        let operation = format!("import of {project}");

        tracing::info!(
            project = %project,
            gitlab = %self.transport.base_url(),
            archive = %archive.display(),
            size_bytes,
            strategy = %plan.strategy,
            "Uploading project archive"
        );

        let upload = MultipartUpload {
            fields: vec![
                ("path".to_string(), project.name().to_string()),
                ("namespace".to_string(), project.namespace().to_string()),
                ("overwrite".to_string(), "true".to_string()),
            ],
            file_path: archive.to_path_buf(),
            streamed: plan.is_streamed(),
        };

        let response = self
            .transport
            .post_multipart("/projects/import", upload, plan.timeout)
            .await?;
        if !response.is_success() {
            tracing::error!(
                project = %project,
                status = response.status,
                "Import request rejected"
            );
            return Err(GitLabError::Rejected {
                operation,
                status: response.status,
                body: response.body,
            }
            .into());
        }

        let path = format!("/projects/{}/import", project.url_encoded());
        let polled = PollingLoop::new(operation, self.policy.clone())
            .with_shutdown(self.shutdown.clone())
            .run(|| self.transport.get(&path), classify_import)
            .await?;

        tracing::info!(project = %project, polls = polled.polls, "Import finished");

        Ok(ImportSummary {
            project: project.clone(),
            strategy: plan.strategy,
            size_bytes,
            polls: polled.polls,
            duration: started.elapsed(),
        })
    }
}

/// Map one import status reply to a polling outcome
pub(crate) fn classify_import(response: &ApiResponse) -> PollOutcome<()> {
    if !response.is_ok() {
        return PollOutcome::Stalled;
    }

    let payload = response
        .json::<ImportStatusPayload>()
        .unwrap_or(ImportStatusPayload {
            import_status: None,
            import_error: None,
        });

    match payload.status() {
        ImportStatus::Finished => PollOutcome::Finished(()),
        ImportStatus::Failed => PollOutcome::Failed(match payload.import_error {
            Some(error) if !error.is_empty() => format!("import failed: {error}"),
            _ => "import failed".to_string(),
        }),
        other => {
            tracing::debug!(status = %other, "Import still pending");
            PollOutcome::Progressing
        }
    }
}
