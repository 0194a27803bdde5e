//! Interactive contest board.
//!
//! The foreground loop owns the board and redraws it once per second so the
//! countdowns keep moving. Refreshes run in spawned tasks and report back over
//! a channel; results are applied in the order they arrive.

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::stdout;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::board_view::{BoardView, write_lines};
use super::links::open_in_browser;
use crate::constants::ui::{MANUAL_REFRESH_COOLDOWN_SECONDS, POLL_MS, TICK_MS};
use crate::contests::{Contest, ContestBoard, SharedSource, fetch_contests};
use crate::error::AppError;

/// Settings for one interactive session.
#[derive(Debug, Clone)]
pub struct InteractiveOptions {
    pub plain: bool,
    /// Draw on the main screen so the last frame stays visible after exit
    pub debug: bool,
    pub auto_refresh: Duration,
    pub source_deadline: Duration,
}

/// What a key press asks the board to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Refresh,
    MoreUpcoming,
    MoreCompleted,
    /// Open the n-th listed contest, 1-based
    Open(usize),
    Ignore,
}

pub fn map_key(key: &KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Char('m') => KeyAction::MoreUpcoming,
        KeyCode::Char('p') => KeyAction::MoreCompleted,
        KeyCode::Char(c @ '1'..='9') => KeyAction::Open(c as usize - '0' as usize),
        _ => KeyAction::Ignore,
    }
}

/// Rate limit for manual refreshes.
#[derive(Debug)]
pub struct RefreshCooldown {
    cooldown: Duration,
    last: Option<Instant>,
}

impl RefreshCooldown {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last: None,
        }
    }

    /// Returns true and starts a new cooldown period if one is not running at `now`.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.cooldown => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Outcome of one background refresh.
#[derive(Debug)]
pub struct RefreshMessage {
    pub result: Result<Vec<Contest>, AppError>,
    pub completed_at: DateTime<Utc>,
}

/// Links of the numbered rows in a frame rendered at `now`, in display order.
///
/// Digit keys index into the frame the user is looking at, so a contest that
/// changes bucket before the next redraw keeps its number until then.
pub fn frame_links(view: &BoardView, board: &ContestBoard, now: DateTime<Utc>) -> Vec<String> {
    view.listed(&board.buckets(now))
        .into_iter()
        .map(|contest| contest.url.clone())
        .collect()
}

/// Starts a refresh cycle in the background. The loop keeps ticking meanwhile.
pub fn spawn_refresh(
    sources: &[SharedSource],
    deadline: Duration,
    tx: &mpsc::UnboundedSender<RefreshMessage>,
) {
    let sources = sources.to_vec();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = fetch_contests(&sources, deadline).await;
        let message = RefreshMessage {
            result,
            completed_at: Utc::now(),
        };
        if tx.send(message).is_err() {
            debug!("Board closed before the refresh finished");
        }
    });
}

/// Runs the interactive board until the user quits.
pub async fn run_interactive_ui(
    sources: Vec<SharedSource>,
    options: InteractiveOptions,
) -> Result<(), AppError> {
    let mut out = stdout();
    let mut board = ContestBoard::new();
    let mut view = BoardView::new(options.plain, true);
    let mut cooldown =
        RefreshCooldown::new(Duration::from_secs(MANUAL_REFRESH_COOLDOWN_SECONDS));
    let (tx, mut rx) = mpsc::unbounded_channel::<RefreshMessage>();

    let mut in_flight = 1usize;
    spawn_refresh(&sources, options.source_deadline, &tx);
    let mut last_auto_refresh = Instant::now();
    let mut last_tick = Instant::now();
    let mut needs_render = true;
    let mut frame_at = Utc::now();
    let mut shown_links: Vec<String> = Vec::new();

    info!(
        "Interactive board started with {} sources, auto refresh every {}s",
        sources.len(),
        options.auto_refresh.as_secs()
    );

    loop {
        while let Ok(message) = rx.try_recv() {
            in_flight = in_flight.saturating_sub(1);
            board.apply_refresh(message.result, message.completed_at);
            needs_render = true;
        }

        if last_auto_refresh.elapsed() >= options.auto_refresh {
            debug!("Auto refresh triggered");
            in_flight += 1;
            spawn_refresh(&sources, options.source_deadline, &tx);
            last_auto_refresh = Instant::now();
            needs_render = true;
        }

        if last_tick.elapsed() >= Duration::from_millis(TICK_MS) {
            last_tick = Instant::now();
            needs_render = true;
        }

        if needs_render {
            view.set_refreshing(in_flight > 0);
            frame_at = Utc::now();
            let lines = view.render_lines(&board, frame_at);
            write_lines(&mut out, &lines, true)?;
            shown_links = frame_links(&view, &board, frame_at);
            needs_render = false;
        }

        if !event::poll(Duration::from_millis(POLL_MS))? {
            tokio::task::yield_now().await;
            continue;
        }

        match event::read()? {
            Event::Key(key) => match map_key(&key) {
                KeyAction::Quit => {
                    info!("Quit requested");
                    break;
                }
                KeyAction::Refresh => {
                    if cooldown.try_acquire(Instant::now()) {
                        info!("Manual refresh requested");
                        in_flight += 1;
                        spawn_refresh(&sources, options.source_deadline, &tx);
                        last_auto_refresh = Instant::now();
                        needs_render = true;
                    } else {
                        debug!("Manual refresh ignored during cooldown");
                    }
                }
                KeyAction::MoreUpcoming => {
                    let available = board.buckets(frame_at).upcoming.len();
                    needs_render |= view.show_more_upcoming(available);
                }
                KeyAction::MoreCompleted => {
                    let available = board.buckets(frame_at).completed.len();
                    needs_render |= view.show_more_completed(available);
                }
                KeyAction::Open(n) => {
                    match shown_links.get(n - 1) {
                        Some(url) => open_in_browser(url),
                        None => debug!("No contest listed at position {n}"),
                    }
                }
                KeyAction::Ignore => {}
            },
            Event::Resize(_, _) => needs_render = true,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contests::{ContestCandidate, ContestSource, Platform};
    use crate::ui::theme::{fg, muted_fg};
    use async_trait::async_trait;
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(&press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(map_key(&press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(map_key(&press(KeyCode::Char('r'))), KeyAction::Refresh);
        assert_eq!(map_key(&press(KeyCode::Char('m'))), KeyAction::MoreUpcoming);
        assert_eq!(map_key(&press(KeyCode::Char('p'))), KeyAction::MoreCompleted);
        assert_eq!(map_key(&press(KeyCode::Char('1'))), KeyAction::Open(1));
        assert_eq!(map_key(&press(KeyCode::Char('9'))), KeyAction::Open(9));
        assert_eq!(map_key(&press(KeyCode::Char('0'))), KeyAction::Ignore);
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_cooldown_blocks_rapid_refreshes() {
        let mut cooldown = RefreshCooldown::new(Duration::from_secs(10));
        let start = Instant::now();
        assert!(cooldown.try_acquire(start));
        assert!(!cooldown.try_acquire(start + Duration::from_secs(3)));
        assert!(cooldown.try_acquire(start + Duration::from_secs(11)));
    }

    struct OneContest;

    #[async_trait]
    impl ContestSource for OneContest {
        fn platform(&self) -> Platform {
            Platform::Codeforces
        }

        fn endpoint(&self) -> &str {
            "memory"
        }

        async fn fetch(&self) -> Result<Vec<ContestCandidate>, AppError> {
            let start = Utc::now() + chrono::Duration::hours(1);
            Ok(vec![ContestCandidate {
                platform: Platform::Codeforces,
                native_id: Some("1".to_string()),
                name: "Round 1".to_string(),
                url: "https://codeforces.com/contests/1".to_string(),
                start: Some(start),
                end: Some(start + chrono::Duration::hours(2)),
            }])
        }
    }

    fn board_contest(name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Contest {
        Contest {
            id: format!("codeforces-{name}"),
            platform: Platform::Codeforces,
            name: name.to_string(),
            start_time: start,
            end_time: end,
            url: format!("https://codeforces.com/contests/{name}"),
        }
    }

    #[test]
    fn test_frame_links_follow_the_rendered_frame() {
        let now = Utc::now();
        let mut board = ContestBoard::new();
        board.apply_refresh(
            Ok(vec![
                board_contest(
                    "ending",
                    now - chrono::Duration::hours(2),
                    now + chrono::Duration::seconds(1),
                ),
                board_contest(
                    "next",
                    now + chrono::Duration::hours(1),
                    now + chrono::Duration::hours(3),
                ),
            ]),
            now,
        );
        let view = BoardView::new(true, true);

        let shown = frame_links(&view, &board, now);
        assert_eq!(
            shown,
            vec![
                "https://codeforces.com/contests/ending".to_string(),
                "https://codeforces.com/contests/next".to_string(),
            ]
        );
        let ending_row = view
            .render_lines(&board, now)
            .into_iter()
            .find(|l| l.contains("ending"))
            .unwrap();
        assert!(ending_row.contains(&format!("{}1.", fg(muted_fg()))));

        // After the live contest ends the order changes, but only on the next frame
        let later = frame_links(&view, &board, now + chrono::Duration::seconds(5));
        assert_eq!(later[0], "https://codeforces.com/contests/next");
        assert_eq!(shown[0], "https://codeforces.com/contests/ending");
    }

    #[tokio::test]
    async fn test_spawned_refresh_reports_over_channel() {
        let sources: Vec<SharedSource> = vec![Arc::new(OneContest)];
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_refresh(&sources, Duration::from_secs(5), &tx);

        let message = rx.recv().await.unwrap();
        let contests = message.result.unwrap();
        assert_eq!(contests.len(), 1);
        assert_eq!(contests[0].id, "codeforces-1");
    }
}
