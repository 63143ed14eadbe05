//! Fixed-interval status polling with progress-based patience
//!
//! [`PollingLoop`] repeatedly fetches a status resource and lets the caller
//! classify each reply. The stall budget only counts *consecutive* replies
//! that show no legible progress: any progressing reply restores it in full,
//! so long-running but healthy operations are never cut short.

use crate::adapters::gitlab::ApiResponse;
use crate::domain::{GitLabError, PorterError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

/// Countdown of consecutive stalled polls still tolerated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    initial: u32,
    remaining: u32,
}

impl PollBudget {
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            remaining: initial,
        }
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Restore full patience after observed progress
    pub fn reset(&mut self) {
        self.remaining = self.initial;
    }

    /// Spend one attempt, returning `true` once the budget is exhausted
    pub fn consume(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.is_exhausted()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Classification of a single status reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// Still running and visibly moving; budget is reset
    Progressing,
    /// Terminal success carrying the extracted result
    Finished(T),
    /// Terminal failure with a human-readable reason
    Failed(String),
    /// Nothing legible; counts against the budget
    Stalled,
}

/// Cadence and limits of one polling run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between two polls
    pub interval: Duration,

    /// Consecutive stalled polls tolerated
    pub max_stalls: u32,

    /// Optional cap on total polling time
    pub max_wait: Option<Duration>,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_stalls: u32) -> Self {
        Self {
            interval,
            max_stalls,
            max_wait: None,
        }
    }

    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }
}

/// Terminal result of a polling run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polled<T> {
    pub value: T,

    /// Status requests issued, the final one included
    pub polls: u32,

    pub elapsed: Duration,
}

/// Blocking sleep-then-retry loop over a status resource
///
/// Transport failures from `fetch` end the run immediately and are never
/// retried. A raised shutdown signal is honoured before every fetch and
/// during every pause.
pub struct PollingLoop {
    operation: String,
    policy: PollPolicy,
    shutdown: Option<watch::Receiver<bool>>,
}

impl PollingLoop {
    /// # Arguments
    ///
    /// * `operation` - Label used in logs and diagnostics (e.g. "export of group/project")
    /// * `policy` - Interval and limits
    pub fn new(operation: impl Into<String>, policy: PollPolicy) -> Self {
        Self {
            operation: operation.into(),
            policy,
            shutdown: None,
        }
    }

    pub fn with_shutdown(mut self, shutdown: Option<watch::Receiver<bool>>) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Poll until `classify` reports a terminal outcome
    ///
    /// # Errors
    ///
    /// - Any error returned by `fetch`, unchanged
    /// - [`GitLabError::OperationFailed`] when a reply is classified as failed
    /// - [`GitLabError::StallLimitReached`] after `max_stalls` consecutive stalls
    /// - [`GitLabError::DeadlineExceeded`] when `max_wait` elapses
    /// - [`PorterError::Cancelled`] when the shutdown signal is raised
    pub async fn run<T, F, Fut, C>(mut self, mut fetch: F, classify: C) -> Result<Polled<T>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<ApiResponse>>,
        C: Fn(&ApiResponse) -> PollOutcome<T>,
    {
        let started = Instant::now();
        let mut budget = PollBudget::new(self.policy.max_stalls);
        let mut polls = 0u32;

        loop {
            self.check_shutdown()?;

            let response = fetch().await?;
            polls += 1;

            match classify(&response) {
                PollOutcome::Finished(value) => {
                    tracing::info!(
                        operation = %self.operation,
                        polls,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Remote operation finished"
                    );
                    return Ok(Polled {
                        value,
                        polls,
                        elapsed: started.elapsed(),
                    });
                }
                PollOutcome::Failed(reason) => {
                    tracing::error!(
                        operation = %self.operation,
                        status = response.status,
                        reason = %reason,
                        "Remote operation failed"
                    );
                    return Err(GitLabError::OperationFailed {
                        operation: self.operation,
                        reason,
                        status: response.status,
                        body: response.body,
                    }
                    .into());
                }
                PollOutcome::Progressing => {
                    budget.reset();
                    tracing::debug!(operation = %self.operation, polls, "Still in progress");
                }
                PollOutcome::Stalled => {
                    if budget.consume() {
                        tracing::error!(
                            operation = %self.operation,
                            attempts = budget.initial(),
                            status = response.status,
                            "No progress observed, giving up"
                        );
                        return Err(GitLabError::StallLimitReached {
                            operation: self.operation,
                            attempts: budget.initial(),
                            status: response.status,
                            body: response.body,
                        }
                        .into());
                    }
                    tracing::warn!(
                        operation = %self.operation,
                        status = response.status,
                        remaining = budget.remaining(),
                        "No progress in status reply"
                    );
                }
            }

            if let Some(max_wait) = self.policy.max_wait {
                if started.elapsed() >= max_wait {
                    return Err(GitLabError::DeadlineExceeded {
                        operation: self.operation,
                        waited_secs: started.elapsed().as_secs(),
                    }
                    .into());
                }
            }

            self.pause().await?;
        }
    }

    fn check_shutdown(&self) -> Result<()> {
        match &self.shutdown {
            Some(shutdown) if *shutdown.borrow() => {
                tracing::info!(operation = %self.operation, "Shutdown requested, stopping poll");
                Err(PorterError::Cancelled)
            }
            _ => Ok(()),
        }
    }

    /// Sleep one interval, waking early if shutdown is raised
    async fn pause(&mut self) -> Result<()> {
        let deadline = Instant::now() + self.policy.interval;

        let Some(shutdown) = self.shutdown.as_mut() else {
            sleep_until(deadline).await;
            return Ok(());
        };

        loop {
            if *shutdown.borrow() {
                return Err(PorterError::Cancelled);
            }

            tokio::select! {
                _ = sleep_until(deadline) => return Ok(()),
                changed = shutdown.changed() => {
                    // Sender gone: nobody can cancel any more.
                    if changed.is_err() {
                        sleep_until(deadline).await;
                        return Ok(());
                    }
                }
            }
        }
    }
}
