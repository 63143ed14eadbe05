//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PorterConfig;
use super::secret::secret_string;
use crate::domain::errors::PorterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PorterConfig
/// 4. Applies environment variable overrides (GLPORTER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use glporter::config::loader::load_config;
///
/// let config = load_config("glporter.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PorterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PorterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PorterError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text, with substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<PorterConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: PorterConfig = toml::from_str(&contents)
        .map_err(|e| PorterError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PorterError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. Every missing variable is reported
/// in a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PorterError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PorterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the GLPORTER_* prefix
///
/// Variables follow the pattern GLPORTER_<SECTION>_<KEY>, for example
/// GLPORTER_GITLAB_BASE_URL. Unparseable numeric values are ignored.
fn apply_env_overrides(config: &mut PorterConfig) {
    if let Ok(val) = std::env::var("GLPORTER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // GitLab overrides
    if let Ok(val) = std::env::var("GLPORTER_GITLAB_BASE_URL") {
        config.gitlab.base_url = val;
    }
    if let Ok(val) = std::env::var("GLPORTER_GITLAB_TOKEN") {
        config.gitlab.token = secret_string(val);
    }
    if let Ok(val) = std::env::var("GLPORTER_GITLAB_TLS_VERIFY") {
        config.gitlab.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("GLPORTER_GITLAB_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.gitlab.timeout_seconds = secs;
        }
    }

    // Export overrides
    if let Ok(val) = std::env::var("GLPORTER_EXPORT_MAX_STALL_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.export.max_stall_retries = retries;
        }
    }
    if let Ok(val) = std::env::var("GLPORTER_EXPORT_POLL_INTERVAL_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.export.poll_interval_seconds = secs;
        }
    }

    // Import overrides
    if let Ok(val) = std::env::var("GLPORTER_IMPORT_POLL_INTERVAL_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.import.poll_interval_seconds = secs;
        }
    }
    if let Ok(val) = std::env::var("GLPORTER_IMPORT_MAX_WAIT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.import.max_wait_seconds = Some(secs);
        }
    }
    if let Ok(val) = std::env::var("GLPORTER_IMPORT_MAX_STALL_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.import.max_stall_retries = retries;
        }
    }
    if let Ok(val) = std::env::var("GLPORTER_IMPORT_LARGE_UPLOAD_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.import.large_upload_timeout_seconds = secs;
        }
    }

    // Listing overrides
    if let Ok(val) = std::env::var("GLPORTER_LISTING_MEMBERSHIP") {
        config.listing.membership = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GLPORTER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("GLPORTER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("GLPORTER_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("GLPORTER_UNIT_SUBST", "test_value");
        let input = "token = \"${GLPORTER_UNIT_SUBST}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"test_value\"\n");
        std::env::remove_var("GLPORTER_UNIT_SUBST");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("GLPORTER_UNIT_MISSING");
        let input = "token = \"${GLPORTER_UNIT_MISSING}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("GLPORTER_UNIT_MISSING"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("GLPORTER_UNIT_COMMENTED");
        let input = "# token = \"${GLPORTER_UNIT_COMMENTED}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${GLPORTER_UNIT_COMMENTED}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-glporter.toml");
        assert!(matches!(result, Err(PorterError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[gitlab]
base_url = "https://gitlab.example.com"
token = "glpat-unit"

[export]
max_stall_retries = 4
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.gitlab.base_url, "https://gitlab.example.com");
        assert_eq!(config.gitlab.token.expose_secret().as_ref(), "glpat-unit");
        assert_eq!(config.export.max_stall_retries, 4);
        assert_eq!(config.export.poll_interval_seconds, 5);
        assert_eq!(config.import.poll_interval_seconds, 1);
    }

    #[test]
    fn test_parse_config_rejects_invalid_values() {
        let toml_content = r#"
[gitlab]
base_url = "gitlab.example.com"
token = "glpat-unit"
"#;
        let err = parse_config(toml_content).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
