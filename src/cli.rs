use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the application should run in non-interactive mode.
/// Non-interactive mode is used when any of these conditions are met:
/// - --once flag is set (print the board and exit)
/// - a progress command is requested
/// - config operations are requested
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once || is_progress_command(args) || is_config_command(args)
}

pub fn is_progress_command(args: &Args) -> bool {
    args.progress || args.toggle.is_some() || args.open_reference.is_some()
}

pub fn is_config_command(args: &Args) -> bool {
    args.list_config
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.enable_source.is_some()
        || args.disable_source.is_some()
}

/// Competitive programming companion
///
/// Shows a live board of Codeforces, CodeChef and LeetCode contests and keeps
/// a study checklist of algorithm topics.
///
/// In interactive mode (default):
/// - Live contests count down to their end, upcoming ones to their start
/// - Press 'm' / 'p' to show more upcoming / completed contests
/// - Press 1-9 to open a listed contest in the browser
/// - Press 'r' to refresh (10s cooldown between refreshes)
/// - Press 'q' or Esc to quit
///
/// The board also refreshes itself periodically (every 10 minutes by default).
#[derive(Parser, Debug)]
#[command(about, version, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Print the contest board once and exit. Useful for scripts or a quick look.
    #[arg(short, long)]
    pub once: bool,

    /// Disable clickable contest links in the output.
    #[arg(long = "plain", short = 'p', help_heading = "Display Options")]
    pub disable_links: bool,

    /// Only fetch from this source (codeforces, codechef, leetcode). Repeatable.
    #[arg(long = "source", value_name = "NAME", help_heading = "Display Options")]
    pub sources: Vec<String>,

    /// Minutes between automatic refreshes of the interactive board.
    /// Overrides the configured interval.
    #[arg(long = "refresh-interval", value_name = "MIN", help_heading = "Display Options")]
    pub refresh_interval: Option<u64>,

    /// Show the study checklist with per-topic progress.
    #[arg(long = "progress", help_heading = "Study Progress")]
    pub progress: bool,

    /// Toggle a checklist flag (read, watched, solved) for a topic.
    #[arg(
        long = "toggle",
        num_args = 2,
        value_names = ["TOPIC", "FLAG"],
        help_heading = "Study Progress"
    )]
    pub toggle: Option<Vec<String>>,

    /// Open the reference video search for a topic in the browser.
    #[arg(long = "open-reference", value_name = "TOPIC", help_heading = "Study Progress")]
    pub open_reference: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// Enable a contest source in config.
    #[arg(long = "enable-source", value_name = "NAME", help_heading = "Configuration")]
    pub enable_source: Option<String>,

    /// Disable a contest source in config.
    #[arg(long = "disable-source", value_name = "NAME", help_heading = "Configuration")]
    pub disable_source: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug mode which doesn't clear the terminal before drawing the board.
    /// Logs are also written to the terminal in this mode.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
