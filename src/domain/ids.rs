//! Domain identifier types with validation
//!
//! This module provides the newtype wrapper for a GitLab project path. One
//! [`ProjectPath`] is the request a coordinator run works on: it is built
//! per invocation, never mutated, and dropped once the run is over.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Everything but ASCII alphanumerics and `-._~` is escaped, `/` included.
const PATH_TOKEN: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Namespaced project path newtype wrapper
///
/// Represents a project by its full path, e.g. `group/subgroup/project`.
///
/// # Examples
///
/// ```
/// use glporter::domain::ids::ProjectPath;
/// use std::str::FromStr;
///
/// let path = ProjectPath::from_str("group/subgroup/project").unwrap();
/// assert_eq!(path.url_encoded(), "group%2Fsubgroup%2Fproject");
/// assert_eq!(path.name(), "project");
/// assert_eq!(path.namespace(), "group/subgroup");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectPath(String);

impl ProjectPath {
    /// Creates a new ProjectPath from a string
    ///
    /// # Arguments
    ///
    /// * `path` - The namespaced project path
    ///
    /// # Returns
    ///
    /// Returns `Ok(ProjectPath)` if the path is valid, `Err` otherwise
    pub fn new(path: impl Into<String>) -> Result<Self, String> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err("Project path cannot be empty".to_string());
        }

        if path.split('/').any(|segment| segment.trim().is_empty()) {
            return Err(format!(
                "Invalid project path '{path}': segments cannot be empty"
            ));
        }

        Ok(Self(path))
    }

    /// Returns the project path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The whole path percent-encoded as a single URL path token
    pub fn url_encoded(&self) -> String {
        utf8_percent_encode(&self.0, PATH_TOKEN).to_string()
    }

    /// Final path segment (the project's own path)
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Every segment before the last one, empty for a top-level project
    pub fn namespace(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
