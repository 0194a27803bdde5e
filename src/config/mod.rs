use crate::contests::models::Platform;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_data_dir_path, get_log_dir_path};
use validation::validate_config;

/// Environment variable overriding the log file path
pub const ENV_LOG_FILE: &str = "CP_COMPANION_LOG_FILE";
/// Environment variable overriding the per-request HTTP timeout
pub const ENV_HTTP_TIMEOUT: &str = "CP_COMPANION_HTTP_TIMEOUT";
/// Environment variable overriding the per-source deadline
pub const ENV_SOURCE_TIMEOUT: &str = "CP_COMPANION_SOURCE_TIMEOUT";
/// Environment variable overriding the progress data directory
pub const ENV_DATA_DIR: &str = "CP_COMPANION_DATA_DIR";

/// Per-source settings. A missing `url` means the platform's public endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SourceSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            url: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SourcesConfig {
    #[serde(default)]
    pub codeforces: SourceSettings,
    #[serde(default)]
    pub codechef: SourceSettings,
    #[serde(default)]
    pub leetcode: SourceSettings,
}

impl SourcesConfig {
    pub fn settings(&self, platform: Platform) -> &SourceSettings {
        match platform {
            Platform::Codeforces => &self.codeforces,
            Platform::CodeChef => &self.codechef,
            Platform::LeetCode => &self.leetcode,
        }
    }

    pub fn settings_mut(&mut self, platform: Platform) -> &mut SourceSettings {
        match platform {
            Platform::Codeforces => &mut self.codeforces,
            Platform::CodeChef => &mut self.codechef,
            Platform::LeetCode => &mut self.leetcode,
        }
    }

    /// Endpoint for `platform`, falling back to its public default
    pub fn url_for(&self, platform: Platform) -> String {
        self.settings(platform)
            .url
            .clone()
            .unwrap_or_else(|| platform.default_endpoint().to_string())
    }

    /// Enabled platforms in a stable order
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.settings(*p).enabled)
            .collect()
    }

    pub fn set_enabled(&mut self, platform: Platform, enabled: bool) {
        self.settings_mut(platform).enabled = enabled;
    }

    /// Disables every platform not listed in `only`. An empty list changes nothing.
    pub fn restrict_to(&mut self, only: &[Platform]) {
        if only.is_empty() {
            return;
        }
        for platform in Platform::ALL {
            if !only.contains(&platform) {
                self.set_enabled(platform, false);
            }
        }
    }
}

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// HTTP timeout in seconds for a single request. Defaults to 30 seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Upper bound for one source per refresh, retries included. Defaults to 20 seconds.
    #[serde(default = "default_source_timeout")]
    pub source_timeout_seconds: u64,
    /// Minutes between automatic refreshes in the interactive board.
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh_minutes: u64,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// Directory holding the progress store. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub sources: SourcesConfig,
}

fn default_http_timeout() -> u64 {
    crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_source_timeout() -> u64 {
    crate::constants::DEFAULT_SOURCE_TIMEOUT_SECONDS
}

fn default_auto_refresh() -> u64 {
    crate::constants::DEFAULT_AUTO_REFRESH_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Config {
            http_timeout_seconds: default_http_timeout(),
            source_timeout_seconds: default_source_timeout(),
            auto_refresh_minutes: default_auto_refresh(),
            log_file_path: None,
            data_dir: None,
            sources: SourcesConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, defaults are used. Environment variables
    /// override config file values.
    ///
    /// # Environment Variables
    /// - `CP_COMPANION_LOG_FILE` - Override log file path
    /// - `CP_COMPANION_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `CP_COMPANION_SOURCE_TIMEOUT` - Override per-source deadline in seconds
    /// - `CP_COMPANION_DATA_DIR` - Override progress data directory
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            tracing::debug!("No config file at {config_path}, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `CP_COMPANION_*` environment overrides in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(log_file_path) = std::env::var(ENV_LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(ENV_HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Some(timeout) = std::env::var(ENV_SOURCE_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.source_timeout_seconds = timeout;
        }

        if let Ok(data_dir) = std::env::var(ENV_DATA_DIR) {
            self.data_dir = Some(data_dir);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Directory holding the progress store, honoring the `data_dir` override.
    pub fn data_dir_path(&self) -> String {
        self.data_dir.clone().unwrap_or_else(get_data_dir_path)
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        let config = Config::load().await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        if !Path::new(&config_path).exists() {
            println!("(Not created yet, showing defaults)");
        }
        println!("────────────────────────────────────");
        println!("Contest Sources:");
        for platform in Platform::ALL {
            let state = if config.sources.settings(platform).enabled {
                "enabled"
            } else {
                "disabled"
            };
            println!(
                "{:<11} {:<9} {}",
                platform.label(),
                state,
                config.sources.url_for(platform)
            );
        }
        println!("────────────────────────────────────");
        println!("Timeouts:");
        println!("HTTP request: {} seconds", config.http_timeout_seconds);
        println!("Per source:   {} seconds", config.source_timeout_seconds);
        println!("Auto-refresh: every {} minutes", config.auto_refresh_minutes);
        println!("────────────────────────────────────");
        println!("Progress Data:");
        println!("{}", config.data_dir_path());
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/cp_companion.log");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent directory.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
