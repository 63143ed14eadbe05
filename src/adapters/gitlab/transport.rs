//! Transport trait definition
//!
//! This module defines the `Transport` trait the export and import
//! coordinators drive GitLab through. The production implementation is
//! [`GitLabClient`](super::GitLabClient); tests substitute scripted fakes.

use crate::domain::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

/// A completed HTTP exchange
///
/// Any reply that arrived counts as a response, whatever its status.
/// Transport-level failures never produce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the status is exactly 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Parse the body as JSON, `None` when it doesn't fit `T`
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Multipart request description for an archive upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartUpload {
    /// Text fields sent before the file part, in order
    pub fields: Vec<(String, String)>,

    /// Local archive sent as the `file` part
    pub file_path: PathBuf,

    /// Stream the archive without a declared length instead of buffering it
    pub streamed: bool,
}

impl MultipartUpload {
    /// File name announced for the `file` part
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "export.tar.gz".to_string())
    }
}

/// Authenticated request/response access to the GitLab REST API
///
/// Paths are relative to the API root (e.g. `/projects/import`). Every
/// method fails with [`GitLabError::ConnectionFailed`](crate::domain::GitLabError::ConnectionFailed)
/// when no response could be obtained; any received response is returned
/// as-is for the caller to interpret.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST url-encoded form fields
    async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<ApiResponse>;

    /// POST a multipart body, with an optional per-request timeout
    async fn post_multipart(
        &self,
        path: &str,
        upload: MultipartUpload,
        timeout: Option<Duration>,
    ) -> Result<ApiResponse>;

    /// GET a resource
    async fn get(&self, path: &str) -> Result<ApiResponse>;

    /// API root URL, for diagnostics
    fn base_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(201, "").is_success());
        assert!(ApiResponse::new(202, "").is_success());
        assert!(!ApiResponse::new(199, "").is_success());
        assert!(!ApiResponse::new(302, "").is_success());
        assert!(!ApiResponse::new(403, "").is_success());
    }

    #[test]
    fn test_is_ok_only_for_200() {
        assert!(ApiResponse::new(200, "").is_ok());
        assert!(!ApiResponse::new(201, "").is_ok());
    }

    #[test]
    fn test_json_parsing() {
        let response = ApiResponse::new(200, r#"{"export_status":"queued"}"#);
        let value: Value = response.json().unwrap();
        assert_eq!(value["export_status"], "queued");

        let garbage = ApiResponse::new(200, "<html>502</html>");
        assert!(garbage.json::<Value>().is_none());
    }

    #[test]
    fn test_upload_file_name() {
        let upload = MultipartUpload {
            fields: vec![],
            file_path: PathBuf::from("/tmp/archives/group-project.tar.gz"),
            streamed: false,
        };
        assert_eq!(upload.file_name(), "group-project.tar.gz");
    }
}
