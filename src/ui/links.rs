//! Outbound links: OSC 8 terminal hyperlinks and handing URLs to the
//! system browser.

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use tracing::{debug, info, warn};

/// Wraps `text` in an OSC 8 hyperlink pointing at `url`.
pub fn hyperlink(text: &str, url: &str) -> String {
    format!("\x1b]8;;{url}\x07{text}\x1b]8;;\x07")
}

/// Program and arguments that open `url` with the platform's default handler.
pub fn opener_command(url: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open", vec![url.to_string()])
    } else if cfg!(target_os = "windows") {
        // The empty argument is the window title `start` expects first.
        (
            "cmd",
            vec![
                "/C".to_string(),
                "start".to_string(),
                String::new(),
                url.to_string(),
            ],
        )
    } else {
        ("xdg-open", vec![url.to_string()])
    }
}

/// Starts `program` with null stdio and reaps it from a background thread so
/// no zombie is left behind while the board keeps running.
pub fn spawn_detached(
    program: &str,
    args: &[String],
) -> io::Result<thread::JoinHandle<io::Result<ExitStatus>>> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || {
        let status = child.wait();
        if let Ok(status) = &status
            && !status.success()
        {
            debug!("Browser opener exited with {status}");
        }
        status
    }))
}

/// Opens `url` in the browser without waiting for it. Failures are only logged.
pub fn open_in_browser(url: &str) {
    let (program, args) = opener_command(url);
    match spawn_detached(program, &args) {
        Ok(_) => info!("Opened {url} with {program}"),
        Err(e) => warn!("Could not open {url} with {program}: {e}"),
    }
}
