use crate::cli::Args;
use crate::config::Config;
use crate::contests::{
    ContestBoard, ContestStatus, Platform, SharedSource, create_sources, fetch_contests,
};
use crate::error::AppError;
use crate::progress::{
    ChecklistFlag, JsonFileStore, ProgressTracker, TOPICS, TopicProgress, require_topic,
};
use crate::ui::theme::{RESET, fg, hint_fg, muted_fg, status_fg};
use crate::ui::{BoardView, open_in_browser, write_lines};
use chrono::Utc;
use crossterm::{execute, terminal::SetTitle};
use std::io::stdout;
use std::time::Duration;
use tracing::info;

pub const TERMINAL_TITLE: &str = "CP COMPANION";

fn parse_platforms(names: &[String]) -> Result<Vec<Platform>, AppError> {
    names.iter().map(|name| name.parse()).collect()
}

/// Validates command line argument combinations.
///
/// Returns an error if incompatible or malformed arguments are used.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    parse_platforms(&args.sources)?;

    if let (Some(enable), Some(disable)) = (&args.enable_source, &args.disable_source) {
        let enable: Platform = enable.parse()?;
        let disable: Platform = disable.parse()?;
        if enable == disable {
            return Err(AppError::config_error(format!(
                "Cannot both enable and disable {enable}"
            )));
        }
    }

    if args.refresh_interval == Some(0) {
        return Err(AppError::config_error(
            "Refresh interval must be at least 1 minute",
        ));
    }

    if let Some(toggle) = &args.toggle
        && let [topic, flag] = toggle.as_slice()
    {
        require_topic(topic)?;
        flag.parse::<ChecklistFlag>()?;
    }

    if let Some(topic) = &args.open_reference {
        require_topic(topic)?;
    }

    Ok(())
}

/// Applies `--source` restrictions to `config` and builds the adapters.
///
/// Sources named on the command line are used even when disabled in the config file.
pub fn sources_for(args: &Args, config: &Config) -> Result<Vec<SharedSource>, AppError> {
    let only = parse_platforms(&args.sources)?;
    let mut config = config.clone();
    for platform in &only {
        config.sources.set_enabled(*platform, true);
    }
    config.sources.restrict_to(&only);
    create_sources(&config)
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    Config::display().await?;
    Ok(())
}

/// Handles configuration update commands (--set-log-file, --clear-log-file,
/// --enable-source, --disable-source).
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = if std::path::Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    if let Some(name) = &args.enable_source {
        let platform: Platform = name.parse()?;
        config.sources.set_enabled(platform, true);
        println!("{platform} enabled.");
    }

    if let Some(name) = &args.disable_source {
        let platform: Platform = name.parse()?;
        config.sources.set_enabled(platform, false);
        println!("{platform} disabled.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Handles the --once command (quick view mode).
///
/// Fetches every enabled source once and prints the board. A total failure is
/// shown as the board's error banner rather than returned as an error.
pub async fn handle_once_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let sources = sources_for(args, config)?;
    let deadline = Duration::from_secs(config.source_timeout_seconds);

    let mut board = ContestBoard::new();
    let result = fetch_contests(&sources, deadline).await;
    board.apply_refresh(result, Utc::now());

    let view = BoardView::new(args.disable_links, false);
    let lines = view.render_lines(&board, Utc::now());

    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    write_lines(&mut stdout(), &lines, false)?;
    Ok(())
}

/// Opens the progress tracker backed by the configured data directory.
pub fn open_tracker(config: &Config) -> Result<ProgressTracker<JsonFileStore>, AppError> {
    let store = JsonFileStore::open(config.data_dir_path())?;
    Ok(ProgressTracker::new(store))
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// One checklist row, e.g. `[x] read  [ ] watched  [x] solved`.
pub fn format_progress_row(progress: &TopicProgress) -> String {
    ChecklistFlag::ALL
        .iter()
        .map(|flag| format!("{} {:<7}", checkbox(progress.flag(*flag)), flag.label()))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Handles the --progress command.
pub fn handle_progress_command(config: &Config) -> Result<(), AppError> {
    let tracker = open_tracker(config)?;

    println!();
    let mut category = "";
    for (topic, progress) in tracker.summary() {
        if topic.category != category {
            category = topic.category;
            println!("{}{}{}", fg(status_fg(ContestStatus::Live)), category, RESET);
        }
        let marker = if progress.is_done() {
            fg(status_fg(ContestStatus::Live))
        } else {
            fg(muted_fg())
        };
        println!(
            "  {}{:<24}{} {:<32} {}{}{}",
            fg(hint_fg()),
            topic.slug,
            RESET,
            topic.title,
            marker,
            format_progress_row(&progress),
            RESET
        );
    }
    println!();
    println!(
        "Completed topics: {} of {}",
        tracker.completed_total(),
        TOPICS.len()
    );
    Ok(())
}

/// Handles the --toggle <TOPIC> <FLAG> command.
pub fn handle_toggle_command(config: &Config, topic: &str, flag: &str) -> Result<(), AppError> {
    let topic = require_topic(topic)?;
    let flag: ChecklistFlag = flag.parse()?;

    let mut tracker = open_tracker(config)?;
    let outcome = tracker.toggle(topic.slug, flag);

    println!("{}: {}", topic.title, format_progress_row(&outcome.progress));
    if outcome.progress.is_done() {
        println!("Topic complete!");
    }
    println!("Completed topics: {}", outcome.completed_total);
    Ok(())
}

/// Handles the --open-reference <TOPIC> command.
pub fn handle_open_reference_command(topic: &str) -> Result<(), AppError> {
    let topic = require_topic(topic)?;
    let url = topic.reference_video_url();
    info!("Opening reference for {}", topic.slug);
    println!("Opening {url}");
    open_in_browser(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_validate_rejects_unknown_source() {
        let args = Args::parse_from(["cp_companion", "--source", "topcoder"]);
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_rejects_conflicting_source_toggles() {
        let args = Args::parse_from([
            "cp_companion",
            "--enable-source",
            "cf",
            "--disable-source",
            "codeforces",
        ]);
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_checks_toggle_arguments() {
        let ok = Args::parse_from(["cp_companion", "--toggle", "bfs", "solved"]);
        assert!(validate_args(&ok).is_ok());

        let bad_topic = Args::parse_from(["cp_companion", "--toggle", "nope", "solved"]);
        assert!(matches!(
            validate_args(&bad_topic),
            Err(AppError::UnknownTopic(_))
        ));

        let bad_flag = Args::parse_from(["cp_companion", "--toggle", "bfs", "skimmed"]);
        assert!(validate_args(&bad_flag).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_refresh_interval() {
        let args = Args::parse_from(["cp_companion", "--refresh-interval", "0"]);
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_sources_for_enables_requested_only() {
        let mut config = Config::default();
        config.sources.leetcode.enabled = false;
        let args = Args::parse_from(["cp_companion", "--source", "leetcode"]);

        let sources = sources_for(&args, &config).unwrap();
        let platforms: Vec<_> = sources.iter().map(|s| s.platform()).collect();
        assert_eq!(platforms, vec![Platform::LeetCode]);
    }

    #[test]
    fn test_progress_row_format() {
        let progress = TopicProgress {
            read: true,
            watched: false,
            solved: true,
            counted: false,
        };
        assert_eq!(
            format_progress_row(&progress),
            "[x] read     [ ] watched  [x] solved "
        );
    }

    #[test]
    fn test_toggle_command_persists_to_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.data_dir = Some(dir.path().to_string_lossy().to_string());

        handle_toggle_command(&config, "bfs", "read").unwrap();
        let tracker = open_tracker(&config).unwrap();
        assert!(tracker.progress("bfs").read);
    }
}
