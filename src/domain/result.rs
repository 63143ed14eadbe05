//! Result type alias for glporter

use super::errors::PorterError;

/// Result type alias for glporter operations
///
/// # Examples
///
/// ```
/// use glporter::domain::result::Result;
/// use glporter::domain::errors::PorterError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PorterError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PorterError>;
