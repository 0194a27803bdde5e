//! Competitive programming companion.
//!
//! Aggregates contest schedules from Codeforces, CodeChef and LeetCode into a
//! single board of live, upcoming and completed contests, and tracks study
//! progress over a catalog of algorithm topics.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cp_companion::contests::{ContestBuckets, create_sources, fetch_contests};
//! use cp_companion::{AppError, Config};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let sources = create_sources(&config)?;
//!
//!     let contests = fetch_contests(&sources, Duration::from_secs(20)).await?;
//!     let buckets = ContestBuckets::partition(&contests, chrono::Utc::now());
//!
//!     for contest in &buckets.upcoming {
//!         println!("{} {}", contest.platform, contest.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod contests;
pub mod error;
pub mod logging;
pub mod progress;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use contests::{Contest, ContestBoard, ContestStatus, Platform, fetch_contests};
pub use error::AppError;
pub use progress::{ChecklistFlag, ProgressTracker, TopicProgress};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
