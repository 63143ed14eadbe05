//! Remote operation status types
//!
//! GitLab reports export and import progress as untyped strings. These enums
//! close the set of values glporter acts on and keep anything else inspectable
//! through an `Unknown` variant carrying the raw value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Project export status as reported by `GET /projects/:id/export`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportStatus {
    Queued,
    Started,
    RegenerationInProgress,
    Finished,
    Failed,
    /// Any other value. Empty when the field was absent.
    Unknown(String),
}

impl ExportStatus {
    /// Parse the `export_status` field, `None` meaning the field was absent
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("queued") => ExportStatus::Queued,
            Some("started") => ExportStatus::Started,
            Some("regeneration_in_progress") => ExportStatus::RegenerationInProgress,
            Some("finished") => ExportStatus::Finished,
            Some("failed") => ExportStatus::Failed,
            Some(other) => ExportStatus::Unknown(other.to_string()),
            None => ExportStatus::Unknown(String::new()),
        }
    }

    /// Whether the export is legibly moving forward
    pub fn is_progressing(&self) -> bool {
        matches!(
            self,
            ExportStatus::Queued | ExportStatus::Started | ExportStatus::RegenerationInProgress
        )
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStatus::Queued => write!(f, "queued"),
            ExportStatus::Started => write!(f, "started"),
            ExportStatus::RegenerationInProgress => write!(f, "regeneration_in_progress"),
            ExportStatus::Finished => write!(f, "finished"),
            ExportStatus::Failed => write!(f, "failed"),
            ExportStatus::Unknown(raw) if raw.is_empty() => write!(f, "<missing>"),
            ExportStatus::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// Project import status as reported by `GET /projects/:id/import`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportStatus {
    /// `none`, `scheduled` or `started`
    InProgress(String),
    Finished,
    Failed,
    /// Any other value. Empty when the field was absent.
    Unknown(String),
}

impl ImportStatus {
    /// Parse the `import_status` field, `None` meaning the field was absent
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("finished") => ImportStatus::Finished,
            Some("failed") => ImportStatus::Failed,
            Some(value @ ("none" | "scheduled" | "started")) => {
                ImportStatus::InProgress(value.to_string())
            }
            Some(other) => ImportStatus::Unknown(other.to_string()),
            None => ImportStatus::Unknown(String::new()),
        }
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStatus::InProgress(raw) => write!(f, "{raw}"),
            ImportStatus::Finished => write!(f, "finished"),
            ImportStatus::Failed => write!(f, "failed"),
            ImportStatus::Unknown(raw) if raw.is_empty() => write!(f, "<missing>"),
            ImportStatus::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// Opaque `_links` object returned once an export has finished
///
/// GitLab currently sends `api_url` and `web_url`; the full object is kept
/// so callers can use whatever the server provides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadLinks(Map<String, Value>);

impl DownloadLinks {
    /// Build links from a raw `_links` value
    ///
    /// Returns `None` for an absent, null, non-object or empty value.
    pub fn from_value(value: Option<Value>) -> Option<Self> {
        match value {
            Some(Value::Object(map)) if !map.is_empty() => Some(Self(map)),
            _ => None,
        }
    }

    /// API download URL (`_links.api_url`)
    pub fn api_url(&self) -> Option<&str> {
        self.0.get("api_url").and_then(Value::as_str)
    }

    /// Browser download URL (`_links.web_url`)
    pub fn web_url(&self) -> Option<&str> {
        self.0.get("web_url").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("queued", ExportStatus::Queued ; "queued")]
    #[test_case("started", ExportStatus::Started ; "started")]
    #[test_case("regeneration_in_progress", ExportStatus::RegenerationInProgress ; "regeneration")]
    #[test_case("finished", ExportStatus::Finished ; "finished")]
    #[test_case("failed", ExportStatus::Failed ; "failed")]
    #[test_case("unknown", ExportStatus::Unknown("unknown".into()) ; "literal unknown")]
    #[test_case("FINISHED", ExportStatus::Unknown("FINISHED".into()) ; "case sensitive")]
    fn test_export_status_parse(raw: &str, expected: ExportStatus) {
        assert_eq!(ExportStatus::parse(Some(raw)), expected);
    }

    #[test]
    fn test_export_status_absent_field() {
        let status = ExportStatus::parse(None);
        assert_eq!(status, ExportStatus::Unknown(String::new()));
        assert_eq!(status.to_string(), "<missing>");
    }

    #[test]
    fn test_export_status_progressing() {
        assert!(ExportStatus::Queued.is_progressing());
        assert!(ExportStatus::Started.is_progressing());
        assert!(ExportStatus::RegenerationInProgress.is_progressing());
        assert!(!ExportStatus::Finished.is_progressing());
        assert!(!ExportStatus::Failed.is_progressing());
        assert!(!ExportStatus::Unknown("none".into()).is_progressing());
    }

    #[test]
    fn test_export_status_display_roundtrips_raw_value() {
        assert_eq!(ExportStatus::RegenerationInProgress.to_string(), "regeneration_in_progress");
        assert_eq!(ExportStatus::Unknown("weird".into()).to_string(), "weird");
    }

    #[test_case(Some("finished"), ImportStatus::Finished ; "finished")]
    #[test_case(Some("failed"), ImportStatus::Failed ; "failed")]
    #[test_case(Some("scheduled"), ImportStatus::InProgress("scheduled".into()) ; "scheduled")]
    #[test_case(Some("started"), ImportStatus::InProgress("started".into()) ; "started")]
    #[test_case(Some("none"), ImportStatus::InProgress("none".into()) ; "none")]
    #[test_case(Some(""), ImportStatus::Unknown("".into()) ; "empty string")]
    #[test_case(Some("garbage"), ImportStatus::Unknown("garbage".into()) ; "garbage")]
    #[test_case(None, ImportStatus::Unknown("".into()) ; "absent")]
    fn test_import_status_parse(raw: Option<&str>, expected: ImportStatus) {
        assert_eq!(ImportStatus::parse(raw), expected);
    }

    #[test]
    fn test_download_links_from_object() {
        let links = DownloadLinks::from_value(Some(json!({
            "api_url": "https://gitlab.example.com/api/v4/projects/1/export/download",
            "web_url": "https://gitlab.example.com/group/project/download_export"
        })))
        .unwrap();
        assert_eq!(
            links.api_url(),
            Some("https://gitlab.example.com/api/v4/projects/1/export/download")
        );
        assert_eq!(
            links.web_url(),
            Some("https://gitlab.example.com/group/project/download_export")
        );
    }

    #[test]
    fn test_download_links_missing_or_empty() {
        assert!(DownloadLinks::from_value(None).is_none());
        assert!(DownloadLinks::from_value(Some(Value::Null)).is_none());
        assert!(DownloadLinks::from_value(Some(json!({}))).is_none());
        assert!(DownloadLinks::from_value(Some(json!("https://x"))).is_none());
    }

    #[test]
    fn test_download_links_serialize_transparently() {
        let links = DownloadLinks::from_value(Some(json!({"api_url": "a"}))).unwrap();
        assert_eq!(serde_json::to_value(&links).unwrap(), json!({"api_url": "a"}));
    }
}
