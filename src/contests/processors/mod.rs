pub mod status;
pub mod time_formatting;

pub use status::{ContestStatus, classify, classify_window};
pub use time_formatting::{
    format_date_local, format_duration, format_start_local, format_time_remaining,
};
