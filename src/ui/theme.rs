use crossterm::style::Color;

use crate::contests::{ContestStatus, Platform};

// Board palette, 256-color ANSI values
pub fn title_bg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn header_bg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn header_fg() -> Color {
    Color::AnsiValue(21)
}
pub fn text_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn muted_fg() -> Color {
    Color::AnsiValue(245)
}
pub fn error_fg() -> Color {
    Color::AnsiValue(196)
} // Bright red
pub fn hint_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan

pub fn status_fg(status: ContestStatus) -> Color {
    match status {
        ContestStatus::Live => Color::AnsiValue(46),
        ContestStatus::Upcoming => Color::AnsiValue(226),
        ContestStatus::Completed => Color::AnsiValue(245),
    }
}

/// Presentation metadata of a platform. Depends on the platform only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformStyle {
    pub icon: &'static str,
    pub color: Color,
    /// Start and end colors of the platform's badge gradient
    pub gradient: (Color, Color),
}

impl PlatformStyle {
    pub fn of(platform: Platform) -> Self {
        match platform {
            Platform::Codeforces => PlatformStyle {
                icon: "▲",
                color: Color::AnsiValue(33),
                gradient: (Color::AnsiValue(33), Color::AnsiValue(196)),
            },
            Platform::CodeChef => PlatformStyle {
                icon: "●",
                color: Color::AnsiValue(137),
                gradient: (Color::AnsiValue(94), Color::AnsiValue(180)),
            },
            Platform::LeetCode => PlatformStyle {
                icon: "■",
                color: Color::AnsiValue(214),
                gradient: (Color::AnsiValue(214), Color::AnsiValue(208)),
            },
        }
    }
}

/// Extracts the 256-color code of `color`, or `fallback` for other color kinds.
pub fn ansi_code(color: Color, fallback: u8) -> u8 {
    match color {
        Color::AnsiValue(val) => val,
        _ => fallback,
    }
}

/// Foreground escape sequence for `color`.
pub fn fg(color: Color) -> String {
    format!("\x1b[38;5;{}m", ansi_code(color, 231))
}

/// Background escape sequence for `color`.
pub fn bg(color: Color) -> String {
    format!("\x1b[48;5;{}m", ansi_code(color, 21))
}

pub const RESET: &str = "\x1b[0m";
