//! GitLab REST client
//!
//! reqwest-backed [`Transport`] implementation plus the project listing
//! used to pick export candidates.

use super::models::ProjectSummary;
use super::transport::{ApiResponse, MultipartUpload, Transport};
use crate::config::{GitLabConfig, SecretString};
use crate::domain::{GitLabError, PorterError, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::HeaderValue;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, ClientBuilder, RequestBuilder};
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Header GitLab reads personal access tokens from
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Page size for project listing
pub const PROJECTS_PER_PAGE: u32 = 50;

/// GitLab API client
///
/// Owns the HTTP connection pool, the access token and the project list
/// cache. TLS verification is fixed when the client is built.
///
/// # Example
///
/// ```no_run
/// use glporter::adapters::gitlab::GitLabClient;
/// use glporter::config::{secret_string, GitLabConfig};
///
/// # async fn example() -> glporter::domain::Result<()> {
/// let config = GitLabConfig {
///     base_url: "https://gitlab.example.com".to_string(),
///     token: secret_string("glpat-xxxxxxxx".to_string()),
///     ..Default::default()
/// };
/// let client = GitLabClient::new(&config)?;
/// let projects = client.list_projects("infra/", true).await?;
/// # Ok(())
/// # }
/// ```
pub struct GitLabClient {
    /// `{base_url}/api/v4`
    api_url: String,

    /// HTTP client for making requests
    client: Client,

    token: SecretString,

    /// Unfiltered `path_with_namespace` lists keyed by the membership flag
    project_cache: Mutex<HashMap<bool, Vec<String>>>,
}

impl GitLabClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &GitLabConfig) -> Result<Self> {
        let api_url = format!("{}/api/v4", config.base_url.trim_end_matches('/'));

        let mut client_builder = ClientBuilder::new()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            tracing::warn!(
                base_url = %config.base_url,
                "TLS certificate verification is disabled"
            );
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            PorterError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            api_url,
            client,
            token: config.token.clone(),
            project_cache: Mutex::new(HashMap::new()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Attach the token, send, and collect status and body
    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let mut token = HeaderValue::from_str(self.token.expose_secret().as_ref()).map_err(|_| {
            PorterError::Configuration("gitlab.token contains invalid header characters".into())
        })?;
        token.set_sensitive(true);

        let response = request
            .header(TOKEN_HEADER, token)
            .send()
            .await
            .map_err(|e| GitLabError::ConnectionFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GitLabError::ConnectionFailed(e.to_string()))?;

        tracing::trace!(status, body_len = body.len(), "GitLab response received");

        Ok(ApiResponse { status, body })
    }

    /// List project paths matching `pattern`
    ///
    /// The pattern is a regular expression matched from the start of each
    /// `path_with_namespace`; an empty pattern matches every project. The
    /// unfiltered list is fetched once per membership flag and reused until
    /// [`invalidate_project_cache`](Self::invalidate_project_cache) is called.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid pattern, and a
    /// [`GitLabError::Rejected`] if any page comes back with a non-200 status.
    pub async fn list_projects(&self, pattern: &str, membership: bool) -> Result<Vec<String>> {
        let matcher = Regex::new(&format!("^(?:{pattern})"))
            .map_err(|e| PorterError::Validation(format!("Invalid project pattern: {e}")))?;

        let projects = match self.cached_projects(membership)? {
            Some(projects) => {
                tracing::debug!(count = projects.len(), membership, "Using cached project list");
                projects
            }
            None => {
                let projects = self.fetch_all_projects(membership).await?;
                self.project_cache
                    .lock()
                    .map_err(|_| PorterError::Other("project cache lock poisoned".into()))?
                    .insert(membership, projects.clone());
                projects
            }
        };

        Ok(projects
            .into_iter()
            .filter(|path| matcher.is_match(path))
            .collect())
    }

    /// Drop every cached project list so the next listing re-fetches
    pub fn invalidate_project_cache(&self) {
        if let Ok(mut cache) = self.project_cache.lock() {
            cache.clear();
        }
    }

    fn cached_projects(&self, membership: bool) -> Result<Option<Vec<String>>> {
        let cache = self
            .project_cache
            .lock()
            .map_err(|_| PorterError::Other("project cache lock poisoned".into()))?;
        Ok(cache.get(&membership).cloned())
    }

    async fn fetch_all_projects(&self, membership: bool) -> Result<Vec<String>> {
        let mut output = Vec::new();
        let mut page = 1u32;

        loop {
            let path = format!(
                "/projects?simple=true&membership={membership}&per_page={PROJECTS_PER_PAGE}&page={page}"
            );
            let response = self.get(&path).await?;

            if !response.is_ok() {
                tracing::error!(status = response.status, page, "Project listing rejected");
                return Err(GitLabError::Rejected {
                    operation: "project listing".to_string(),
                    status: response.status,
                    body: response.body,
                }
                .into());
            }

            let entries: Vec<ProjectSummary> = serde_json::from_str(&response.body).map_err(|e| {
                PorterError::Serialization(format!(
                    "Unexpected project listing on page {page}: {e}: {}",
                    response.body
                ))
            })?;

            if entries.is_empty() {
                break;
            }

            output.extend(entries.into_iter().map(|p| p.path_with_namespace));
            page += 1;
        }

        tracing::info!(count = output.len(), pages = page - 1, membership, "Fetched project list");

        Ok(output)
    }
}

#[async_trait]
impl Transport for GitLabClient {
    async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<ApiResponse> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path)).form(form)).await
    }

    async fn post_multipart(
        &self,
        path: &str,
        upload: MultipartUpload,
        timeout: Option<Duration>,
    ) -> Result<ApiResponse> {
        let file_name = upload.file_name();

        let part = if upload.streamed {
            let file = tokio::fs::File::open(&upload.file_path).await?;
            Part::stream(Body::from(file))
        } else {
            let bytes = tokio::fs::read(&upload.file_path).await?;
            Part::bytes(bytes)
        };
        let part = part
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| PorterError::Other(format!("Invalid upload content type: {e}")))?;

        let form = upload
            .fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part("file", part);

        tracing::debug!(path, streamed = upload.streamed, ?timeout, "POST multipart");

        let mut request = self.client.post(self.url(path)).multipart(form);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        self.send(request).await
    }

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        tracing::trace!(path, "GET");
        self.send(self.client.get(self.url(path))).await
    }

    fn base_url(&self) -> &str {
        &self.api_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config(base_url: &str) -> GitLabConfig {
        GitLabConfig {
            base_url: base_url.to_string(),
            token: secret_string("glpat-unit".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_api_url_appends_version() {
        let client = GitLabClient::new(&config("https://gitlab.example.com")).unwrap();
        assert_eq!(client.base_url(), "https://gitlab.example.com/api/v4");
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let client = GitLabClient::new(&config("https://gitlab.example.com/")).unwrap();
        assert_eq!(client.base_url(), "https://gitlab.example.com/api/v4");
    }

    #[test]
    fn test_client_builds_without_tls_verification() {
        let mut cfg = config("https://gitlab.internal");
        cfg.tls_verify = false;
        assert!(GitLabClient::new(&cfg).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_pattern_is_validation_error() {
        let client = GitLabClient::new(&config("http://127.0.0.1:9")).unwrap();
        let result = client.list_projects("(unclosed", true).await;
        assert!(matches!(result, Err(PorterError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_failure() {
        let client = GitLabClient::new(&config("http://127.0.0.1:9")).unwrap();
        let result = client.get("/projects").await;
        assert!(matches!(
            result,
            Err(PorterError::GitLab(GitLabError::ConnectionFailed(_)))
        ));
    }
}
