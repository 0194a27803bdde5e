use crate::cli::Args;
use crate::config::Config;
use crate::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILE_NAME: &str = "cp_companion.log";
const DEFAULT_DIRECTIVE: &str = "cp_companion=info";

/// Splits the chosen log location into directory and file name.
///
/// Uses `custom_path` when given, otherwise the default log directory.
pub fn resolve_log_location(custom_path: Option<&str>) -> (String, String) {
    match custom_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(DEFAULT_LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (
            Config::get_log_dir_path(),
            DEFAULT_LOG_FILE_NAME.to_string(),
        ),
    }
}

/// Whether log lines should also go to stdout.
///
/// The interactive board and `--once` output own the terminal, so they log to
/// the file only unless `--debug` is set.
pub fn logs_to_stdout(args: &Args) -> bool {
    if args.debug {
        return true;
    }
    crate::cli::is_noninteractive_mode(args) && !args.once
}

fn env_filter() -> Result<EnvFilter, AppError> {
    let directive: Directive = DEFAULT_DIRECTIVE
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Sets up logging for the application.
///
/// - Interactive mode and `--once`: logs only to file
/// - Other non-interactive modes and `--debug`: logs to both stdout and file
/// - Creates the log directory if it doesn't exist
/// - Uses a daily rolling file appender
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(args: &Args) -> Result<(String, WorkerGuard), AppError> {
    let config_log_path = Config::load()
        .await
        .ok()
        .and_then(|config| config.log_file_path);

    let custom_log_path = args.log_file.as_deref().or(config_log_path.as_deref());
    let (log_dir, log_file_name) = resolve_log_location(custom_log_path);

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must outlive every log call or buffered lines are lost
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(env_filter()?);

    let registry = tracing_subscriber::registry().with(file_layer);
    if logs_to_stdout(args) {
        registry
            .with(
                fmt::Layer::new()
                    .with_writer(stdout)
                    .with_ansi(true)
                    .with_filter(env_filter()?),
            )
            .try_init()
    } else {
        registry.try_init()
    }
    .map_err(|e| AppError::log_setup_error(format!("Failed to install subscriber: {e}")))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_custom_log_location_is_split() {
        let (dir, file) = resolve_log_location(Some("/tmp/cp/app.log"));
        assert_eq!(dir, "/tmp/cp");
        assert_eq!(file, "app.log");

        let (dir, file) = resolve_log_location(Some("bare.log"));
        assert_eq!(dir, ".");
        assert_eq!(file, "bare.log");
    }

    #[test]
    fn test_default_log_location() {
        let (dir, file) = resolve_log_location(None);
        assert!(dir.ends_with("logs"));
        assert_eq!(file, "cp_companion.log");
    }

    #[test]
    fn test_stdout_logging_by_mode() {
        let interactive = Args::parse_from(["cp_companion"]);
        assert!(!logs_to_stdout(&interactive));

        let once = Args::parse_from(["cp_companion", "--once"]);
        assert!(!logs_to_stdout(&once));

        let progress = Args::parse_from(["cp_companion", "--progress"]);
        assert!(logs_to_stdout(&progress));

        let debug_once = Args::parse_from(["cp_companion", "--once", "--debug"]);
        assert!(logs_to_stdout(&debug_once));
    }
}
