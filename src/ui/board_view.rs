//! Board rendering: header, error banner, one section per status bucket and
//! the key hint footer.
//!
//! Lines are built as strings with embedded ANSI sequences first and written
//! to the terminal in one go, so redrawing every second does not flicker.

use chrono::{DateTime, Local, Utc};
use std::io::{Stdout, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::links::hyperlink;
use super::theme::{
    PlatformStyle, RESET, bg, error_fg, fg, header_bg, header_fg, hint_fg, muted_fg, status_fg,
    text_fg, title_bg,
};
use crate::constants::ui::{CONTENT_MARGIN, NAME_COLUMN_WIDTH, PAGE_SIZE};
use crate::contests::processors::{
    format_date_local, format_duration, format_start_local, format_time_remaining,
};
use crate::contests::{Contest, ContestBoard, ContestBuckets, ContestStatus};
use crate::error::AppError;

const TITLE: &str = "CP COMPANION";
const HEADER_WIDTH: usize = 78;

/// How much of the board is visible and how it is decorated.
#[derive(Debug, Clone)]
pub struct BoardView {
    upcoming_limit: usize,
    completed_limit: usize,
    plain: bool,
    interactive: bool,
    refreshing: bool,
}

impl BoardView {
    /// `plain` disables terminal hyperlinks; `interactive` adds numbering hints and the footer.
    pub fn new(plain: bool, interactive: bool) -> Self {
        Self {
            upcoming_limit: PAGE_SIZE,
            completed_limit: PAGE_SIZE,
            plain,
            interactive,
            refreshing: false,
        }
    }

    pub fn set_refreshing(&mut self, refreshing: bool) {
        self.refreshing = refreshing;
    }

    pub fn upcoming_limit(&self) -> usize {
        self.upcoming_limit
    }

    pub fn completed_limit(&self) -> usize {
        self.completed_limit
    }

    /// Reveals another page of upcoming contests. Returns false when all are already shown.
    pub fn show_more_upcoming(&mut self, available: usize) -> bool {
        grow_limit(&mut self.upcoming_limit, available)
    }

    /// Reveals another page of completed contests. Returns false when all are already shown.
    pub fn show_more_completed(&mut self, available: usize) -> bool {
        grow_limit(&mut self.completed_limit, available)
    }

    /// Contests in the order they appear on screen. Live is never truncated.
    pub fn listed<'a>(&self, buckets: &'a ContestBuckets) -> Vec<&'a Contest> {
        buckets
            .live
            .iter()
            .chain(buckets.upcoming.iter().take(self.upcoming_limit))
            .chain(buckets.completed.iter().take(self.completed_limit))
            .collect()
    }

    fn visible_in(&self, status: ContestStatus, available: usize) -> usize {
        match status {
            ContestStatus::Live => available,
            ContestStatus::Upcoming => available.min(self.upcoming_limit),
            ContestStatus::Completed => available.min(self.completed_limit),
        }
    }

    /// Builds every line of the board as seen at `now`.
    pub fn render_lines(&self, board: &ContestBoard, now: DateTime<Utc>) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(self.header_line(board));
        lines.push(self.subheader_line(board, now));

        if let Some(banner) = board.error_banner() {
            lines.push(String::new());
            lines.push(format!("{}{}{}", fg(error_fg()), banner, RESET));
        }

        if !board.has_loaded() {
            lines.push(String::new());
            if board.error_banner().is_none() {
                lines.push(format!("{}Loading contests...{}", fg(text_fg()), RESET));
            }
            if self.interactive {
                lines.push(String::new());
                lines.push(self.footer_line());
            }
            return lines;
        }

        let buckets = board.buckets(now);
        let mut index = 0;
        for status in [
            ContestStatus::Live,
            ContestStatus::Upcoming,
            ContestStatus::Completed,
        ] {
            let bucket = buckets.get(status);
            lines.push(String::new());
            lines.push(format!(
                "{}{} ({}){}",
                fg(status_fg(status)),
                status.heading(),
                bucket.len(),
                RESET
            ));

            if bucket.is_empty() {
                lines.push(format!(
                    "{}{}none{}",
                    margin(),
                    fg(muted_fg()),
                    RESET
                ));
                continue;
            }

            let visible = self.visible_in(status, bucket.len());
            for contest in &bucket[..visible] {
                index += 1;
                lines.push(self.contest_line(contest, status, index, now));
            }

            let hidden = bucket.len() - visible;
            if hidden > 0 {
                lines.push(self.show_more_line(status, hidden));
            }
        }

        if self.interactive {
            lines.push(String::new());
            lines.push(self.footer_line());
        }
        lines
    }

    fn header_line(&self, board: &ContestBoard) -> String {
        let status = match (self.refreshing, board.last_updated()) {
            (true, _) => "refreshing...".to_string(),
            (false, Some(at)) => format!(
                "updated {}",
                at.with_timezone(&Local).format("%H:%M:%S")
            ),
            (false, None) => String::new(),
        };
        let width = HEADER_WIDTH.saturating_sub(TITLE.len() + 2);
        format!(
            "{}{} {} {}{}{:>width$}{}",
            bg(title_bg()),
            fg(header_fg()),
            TITLE,
            bg(header_bg()),
            fg(text_fg()),
            status,
            RESET,
            width = width
        )
    }

    fn subheader_line(&self, board: &ContestBoard, now: DateTime<Utc>) -> String {
        let summary = if board.has_loaded() {
            let buckets = board.buckets(now);
            format!(
                "{} live, {} upcoming, {} completed",
                buckets.live.len(),
                buckets.upcoming.len(),
                buckets.completed.len()
            )
        } else {
            "Contest schedule".to_string()
        };
        format!("{}{}{}", fg(status_fg(ContestStatus::Live)), summary, RESET)
    }

    fn contest_line(
        &self,
        contest: &Contest,
        status: ContestStatus,
        index: usize,
        now: DateTime<Utc>,
    ) -> String {
        let style = PlatformStyle::of(contest.platform);
        let number = if self.interactive && index <= 9 {
            format!("{index}.")
        } else {
            "  ".to_string()
        };

        let fitted = fit_width(&contest.name, NAME_COLUMN_WIDTH);
        let trimmed = fitted.trim_end();
        let padding = " ".repeat(fitted.len() - trimmed.len());
        let name = if self.plain {
            fitted.clone()
        } else {
            format!("{}{}", hyperlink(trimmed, &contest.url), padding)
        };

        let timing = match status {
            ContestStatus::Live => format!(
                "ends in {}",
                format_time_remaining(contest.end_time, now)
            ),
            ContestStatus::Upcoming => format!(
                "starts in {}",
                format_time_remaining(contest.start_time, now)
            ),
            ContestStatus::Completed => format!("ended {}", format_date_local(contest.end_time)),
        };

        format!(
            "{}{}{} {}{} {}{}{} {}{}  {}{:<15} {:>7}  {}{}{}",
            margin(),
            fg(muted_fg()),
            number,
            fg(style.gradient.0),
            style.icon,
            fg(style.gradient.1),
            contest.platform.short_code(),
            RESET,
            fg(text_fg()),
            name,
            fg(muted_fg()),
            format_start_local(contest.start_time),
            format_duration(contest.start_time, contest.end_time),
            fg(status_fg(status)),
            timing,
            RESET
        )
    }

    fn show_more_line(&self, status: ContestStatus, hidden: usize) -> String {
        let hint = match (self.interactive, status) {
            (true, ContestStatus::Upcoming) => format!("{hidden} more, press m to show more"),
            (true, ContestStatus::Completed) => format!("{hidden} more, press p to show more"),
            _ => format!("{hidden} more"),
        };
        format!("{}{}{}{}", margin(), fg(hint_fg()), hint, RESET)
    }

    fn footer_line(&self) -> String {
        format!(
            "{}q quit  r refresh  m more upcoming  p more completed  1-9 open{}",
            fg(hint_fg()),
            RESET
        )
    }
}

fn grow_limit(limit: &mut usize, available: usize) -> bool {
    if *limit >= available {
        return false;
    }
    *limit += PAGE_SIZE;
    true
}

fn margin() -> String {
    " ".repeat(CONTENT_MARGIN)
}

/// Truncates `text` to `width` display columns (adding an ellipsis when cut)
/// and pads it with spaces to exactly `width` columns.
pub fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;

    if UnicodeWidthStr::width(text) <= width {
        out.push_str(text);
        used = UnicodeWidthStr::width(text);
    } else {
        let budget = width.saturating_sub(1);
        for c in text.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w > budget {
                break;
            }
            out.push(c);
            used += w;
        }
        if width > 0 {
            out.push('…');
            used += 1;
        }
    }

    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Writes the board. Interactive mode redraws in place from the top-left corner;
/// otherwise lines are printed in sequence and stay in terminal history.
pub fn write_lines(stdout: &mut Stdout, lines: &[String], interactive: bool) -> Result<(), AppError> {
    let mut buffer = String::with_capacity(lines.iter().map(|l| l.len() + 12).sum());
    if interactive {
        buffer.push_str("\x1b[H\x1b[0J");
        for (i, line) in lines.iter().enumerate() {
            buffer.push_str(&format!("\x1b[{};1H{}", i + 1, line));
        }
    } else {
        for line in lines {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }
    stdout.write_all(buffer.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
