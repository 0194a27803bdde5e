pub mod aggregator;
pub mod board;
pub mod models;
pub mod processors;
pub mod sources;

pub use aggregator::{ContestBuckets, aggregate, collect_outcomes, fetch_contests};
pub use board::ContestBoard;
pub use models::{Contest, ContestCandidate, Platform};
pub use processors::{ContestStatus, classify, format_time_remaining};
pub use sources::{ContestSource, SharedSource, SourceOutcome, build_sources, create_sources};
