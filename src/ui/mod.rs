pub mod board_view;
pub mod interactive;
pub mod links;
pub mod theme;

pub use board_view::{BoardView, fit_width, write_lines};
pub use interactive::{InteractiveOptions, KeyAction, map_key, run_interactive_ui};
pub use links::{hyperlink, open_in_browser};
pub use theme::PlatformStyle;
