//! Export coordinator - drives a single project export to completion
//!
//! Submits the export, then polls its status until GitLab either hands out
//! download links or stops showing progress.

use crate::adapters::gitlab::{ApiResponse, ExportStatusPayload, Transport};
use crate::core::polling::{PollOutcome, PollPolicy, PollingLoop};
use crate::domain::{DownloadLinks, ExportStatus, GitLabError, PorterError, ProjectPath, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Pause between two export status polls
pub const DEFAULT_EXPORT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Export coordinator
///
/// Holds no per-export state; every call to
/// [`export_project`](Self::export_project) gets its own budget.
pub struct ExportCoordinator<T: Transport> {
    transport: Arc<T>,
    poll_interval: Duration,
    shutdown: Option<watch::Receiver<bool>>,
}

impl<T: Transport> ExportCoordinator<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            poll_interval: DEFAULT_EXPORT_POLL_INTERVAL,
            shutdown: None,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Stop polling as soon as `shutdown` turns `true`
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Export a project and wait for its download links
    ///
    /// `max_stall_retries` is the number of consecutive polls without
    /// legible progress tolerated before giving up. Progress restores it.
    ///
    /// # Errors
    ///
    /// - [`PorterError::Validation`] if `max_stall_retries` is zero
    /// - [`GitLabError::Rejected`] if the export request is not accepted
    /// - [`GitLabError::OperationFailed`] if GitLab reports the export failed
    /// - [`GitLabError::StallLimitReached`] if progress stops
    /// - [`GitLabError::ConnectionFailed`] on any transport failure
    pub async fn export_project(
        &self,
        project: &ProjectPath,
        max_stall_retries: u32,
    ) -> Result<DownloadLinks> {
        if max_stall_retries == 0 {
            return Err(PorterError::Validation(
                "max_stall_retries must be at least 1".to_string(),
            ));
        }

        let operation = format!("export of {project}");
        let path = format!("/projects/{}/export", project.url_encoded());

        tracing::info!(
            project = %project,
            gitlab = %self.transport.base_url(),
            "Requesting project export"
        );

        let response = self.transport.post(&path, &[]).await?;
        if !response.is_success() {
            tracing::error!(
                project = %project,
                status = response.status,
                "Export request rejected"
            );
            return Err(GitLabError::Rejected {
                operation,
                status: response.status,
                body: response.body,
            }
            .into());
        }

        let policy = PollPolicy::new(self.poll_interval, max_stall_retries);
        let polled = PollingLoop::new(operation, policy)
            .with_shutdown(self.shutdown.clone())
            .run(|| self.transport.get(&path), classify_export)
            .await?;

        tracing::info!(
            project = %project,
            polls = polled.polls,
            api_url = polled.value.api_url().unwrap_or_default(),
            "Export ready for download"
        );

        Ok(polled.value)
    }
}

/// Map one export status reply to a polling outcome
///
/// `finished` only counts once links are attached; until then it is a stall,
/// since a later poll usually carries them. `failed` ends the wait at once
/// rather than spending the stall budget like other unrecognized states.
pub(crate) fn classify_export(response: &ApiResponse) -> PollOutcome<DownloadLinks> {
    if !response.is_ok() {
        return PollOutcome::Stalled;
    }

    let Some(payload) = response.json::<ExportStatusPayload>() else {
        tracing::warn!(body = %response.body, "Unreadable export status");
        return PollOutcome::Stalled;
    };

    let status = payload.status();
    match status {
        ExportStatus::Finished => match payload.download_links() {
            Some(links) => PollOutcome::Finished(links),
            None => {
                tracing::warn!("Export finished without download links");
                PollOutcome::Stalled
            }
        },
        ExportStatus::Failed => PollOutcome::Failed("export failed".to_string()),
        ref s if s.is_progressing() => {
            tracing::debug!(status = %s, "Export in progress");
            PollOutcome::Progressing
        }
        other => {
            tracing::warn!(status = %other, "Unrecognized export status");
            PollOutcome::Stalled
        }
    }
}
