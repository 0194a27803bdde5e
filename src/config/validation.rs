use super::Config;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Timeouts and the auto-refresh interval must be positive
/// - At least one contest source must be enabled
/// - Enabled source URLs must be http(s) URLs
/// - If log file path is provided, it cannot be empty and its parent directory must be creatable
/// - If data directory is provided, it cannot be empty
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if config.source_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "Source timeout must be at least 1 second",
        ));
    }

    if config.auto_refresh_minutes == 0 {
        return Err(AppError::config_error(
            "Auto-refresh interval must be at least 1 minute",
        ));
    }

    let enabled = config.sources.enabled_platforms();
    if enabled.is_empty() {
        return Err(AppError::config_error(
            "At least one contest source must be enabled",
        ));
    }

    for platform in enabled {
        let url = config.sources.url_for(platform);
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::config_error(format!(
                "{platform} URL must start with http:// or https:// (got '{url}')"
            )));
        }
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    if let Some(data_dir) = &config.data_dir
        && data_dir.trim().is_empty()
    {
        return Err(AppError::config_error("Data directory cannot be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let mut config = Config::default();
        config.http_timeout_seconds = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.source_timeout_seconds = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.auto_refresh_minutes = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_all_sources_disabled_rejected() {
        let mut config = Config::default();
        config.sources.codeforces.enabled = false;
        config.sources.codechef.enabled = false;
        config.sources.leetcode.enabled = false;
        let err = validate_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: At least one contest source must be enabled"
        );
    }

    #[test]
    fn test_bad_url_rejected_only_when_enabled() {
        let mut config = Config::default();
        config.sources.codechef.url = Some("ftp://codechef.com".to_string());
        assert!(validate_config(&config).is_err());

        config.sources.codechef.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_log_path_parent_is_created() {
        let temp_dir = tempdir().unwrap();
        let log_path = temp_dir.path().join("nested").join("app.log");
        let mut config = Config::default();
        config.log_file_path = Some(log_path.to_string_lossy().to_string());
        assert!(validate_config(&config).is_ok());
        assert!(temp_dir.path().join("nested").exists());
    }

    #[test]
    fn test_empty_paths_rejected() {
        let mut config = Config::default();
        config.log_file_path = Some(String::new());
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.data_dir = Some("  ".to_string());
        assert!(validate_config(&config).is_err());
    }
}
