use crate::cli::Args;
use crate::commands::{TERMINAL_TITLE, sources_for};
use crate::config::Config;
use crate::error::AppError;
use crate::ui::{self, InteractiveOptions};
use crossterm::{
    cursor, execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;
use std::time::Duration;

/// Options for the interactive board from arguments and config.
/// `--refresh-interval` takes precedence over the configured interval.
pub fn interactive_options(args: &Args, config: &Config) -> InteractiveOptions {
    let minutes = args.refresh_interval.unwrap_or(config.auto_refresh_minutes);
    InteractiveOptions {
        plain: args.disable_links,
        debug: args.debug,
        auto_refresh: Duration::from_secs(minutes.saturating_mul(60)),
        source_deadline: Duration::from_secs(config.source_timeout_seconds),
    }
}

/// Run the interactive application flow.
///
/// - Sets up terminal raw mode and, outside debug mode, the alternate screen
/// - Runs the interactive board
/// - Restores the terminal even when the board returns an error
pub async fn run_interactive(args: &Args, config: &Config) -> Result<(), AppError> {
    let sources = sources_for(args, config)?;
    let options = interactive_options(args, config);
    let debug = options.debug;

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, SetTitle(TERMINAL_TITLE))?;
    if !debug {
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
    }

    let result = ui::run_interactive_ui(sources, options).await;

    if !debug {
        execute!(out, cursor::Show, LeaveAlternateScreen)?;
    }
    disable_raw_mode()?;

    result
}
