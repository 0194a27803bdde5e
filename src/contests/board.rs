use chrono::{DateTime, Utc};
use tracing::{error, info};

use super::aggregator::ContestBuckets;
use super::models::Contest;
use crate::error::AppError;

/// The contest set currently on display.
///
/// A refresh result replaces the whole set at once; a failed refresh leaves
/// the previous set in place and raises the error banner instead.
#[derive(Debug, Clone, Default)]
pub struct ContestBoard {
    contests: Vec<Contest>,
    last_updated: Option<DateTime<Utc>>,
    error_banner: Option<String>,
}

impl ContestBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contests(&self) -> &[Contest] {
        &self.contests
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// True once at least one refresh has succeeded
    pub fn has_loaded(&self) -> bool {
        self.last_updated.is_some()
    }

    /// Applies the result of one refresh cycle. Returns whether the set was replaced.
    pub fn apply_refresh(
        &mut self,
        result: Result<Vec<Contest>, AppError>,
        completed_at: DateTime<Utc>,
    ) -> bool {
        match result {
            Ok(contests) => {
                info!(
                    "Contest board updated: {} -> {} contests",
                    self.contests.len(),
                    contests.len()
                );
                self.contests = contests;
                self.last_updated = Some(completed_at);
                self.error_banner = None;
                true
            }
            Err(e) => {
                error!(
                    "Contest refresh failed, keeping {} contests: {}",
                    self.contests.len(),
                    e
                );
                self.error_banner = Some(format!("Failed to fetch contests: {e}"));
                false
            }
        }
    }

    /// Buckets computed against `now`; never cached.
    pub fn buckets(&self, now: DateTime<Utc>) -> ContestBuckets {
        ContestBuckets::partition(&self.contests, now)
    }
}
