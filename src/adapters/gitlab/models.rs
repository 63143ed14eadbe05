//! GitLab API payload models
//!
//! Only the fields glporter reads are modelled; everything else in the
//! replies is ignored.

use crate::domain::{DownloadLinks, ExportStatus, ImportStatus};
use serde::Deserialize;
use serde_json::Value;

/// Body of `GET /projects/:id/export`
#[derive(Debug, Clone, Deserialize)]
pub struct ExportStatusPayload {
    #[serde(default)]
    pub export_status: Option<String>,

    #[serde(default, rename = "_links")]
    pub links: Option<Value>,
}

impl ExportStatusPayload {
    pub fn status(&self) -> ExportStatus {
        ExportStatus::parse(self.export_status.as_deref())
    }

    /// Download links, if the reply carries a usable `_links` object
    pub fn download_links(&self) -> Option<DownloadLinks> {
        DownloadLinks::from_value(self.links.clone())
    }
}

/// Body of `GET /projects/:id/import`
#[derive(Debug, Clone, Deserialize)]
pub struct ImportStatusPayload {
    #[serde(default)]
    pub import_status: Option<String>,

    #[serde(default)]
    pub import_error: Option<String>,
}

impl ImportStatusPayload {
    pub fn status(&self) -> ImportStatus {
        ImportStatus::parse(self.import_status.as_deref())
    }
}

/// One entry of `GET /projects?simple=true`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSummary {
    pub path_with_namespace: String,
}
