//! Scripted in-memory transport for coordinator tests

use crate::adapters::gitlab::{ApiResponse, MultipartUpload, Transport};
use crate::domain::{GitLabError, PorterError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Recorded {
    Post {
        path: String,
        form: Vec<(String, String)>,
    },
    Multipart {
        path: String,
        upload: MultipartUpload,
        timeout: Option<Duration>,
    },
    Get {
        path: String,
    },
}

/// Replays queued replies in order, POSTs and GETs on separate queues
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    posts: Mutex<VecDeque<Result<ApiResponse>>>,
    gets: Mutex<VecDeque<Result<ApiResponse>>>,
    recorded: Mutex<Vec<Recorded>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply_post(self, status: u16, body: &str) -> Self {
        self.posts
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    pub(crate) fn reply_get(self, status: u16, body: &str) -> Self {
        self.gets
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    pub(crate) fn fail_get(self, message: &str) -> Self {
        self.gets
            .lock()
            .unwrap()
            .push_back(Err(GitLabError::ConnectionFailed(message.to_string()).into()));
        self
    }

    pub(crate) fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    pub(crate) fn get_count(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|r| matches!(r, Recorded::Get { .. }))
            .count()
    }

    fn record(&self, request: Recorded) {
        self.recorded.lock().unwrap().push(request);
    }

    fn next(queue: &Mutex<VecDeque<Result<ApiResponse>>>) -> Result<ApiResponse> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PorterError::Other("no scripted reply left".into())))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<ApiResponse> {
        self.record(Recorded::Post {
            path: path.to_string(),
            form: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        Self::next(&self.posts)
    }

    async fn post_multipart(
        &self,
        path: &str,
        upload: MultipartUpload,
        timeout: Option<Duration>,
    ) -> Result<ApiResponse> {
        self.record(Recorded::Multipart {
            path: path.to_string(),
            upload,
            timeout,
        });
        Self::next(&self.posts)
    }

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.record(Recorded::Get {
            path: path.to_string(),
        });
        Self::next(&self.gets)
    }

    fn base_url(&self) -> &str {
        "scripted://gitlab/api/v4"
    }
}
