use clap::Parser;
use cp_companion::cli::{Args, is_config_command};
use cp_companion::commands::{
    handle_config_update_command, handle_list_config_command, handle_once_command,
    handle_open_reference_command, handle_progress_command, handle_toggle_command, validate_args,
};
use cp_companion::{AppError, Config, app, logging};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    validate_args(&args)?;

    // Keep the guard alive until exit so buffered log lines reach the file
    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return handle_list_config_command().await;
    }

    if is_config_command(&args) {
        return handle_config_update_command(&args).await;
    }

    if let Some(topic) = &args.open_reference {
        return handle_open_reference_command(topic);
    }

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;

    if let Some(toggle) = &args.toggle
        && let [topic, flag] = toggle.as_slice()
    {
        return handle_toggle_command(&config, topic, flag);
    }

    if args.progress {
        return handle_progress_command(&config);
    }

    if args.once {
        return handle_once_command(&args, &config).await;
    }

    app::run_interactive(&args, &config).await
}
