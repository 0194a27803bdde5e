//! Aggregation of every enabled contest source into one validated, ordered set.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::contests::models::{Contest, ContestCandidate, DedupKey};
use crate::contests::processors::{ContestStatus, classify};
use crate::contests::sources::{ContestSource, SharedSource, SourceOutcome};
use crate::error::AppError;

/// Runs one source under a deadline and records its outcome.
///
/// A source that exceeds `deadline` is reported as failed; the other sources
/// are unaffected.
async fn run_source(source: &dyn ContestSource, deadline: Duration) -> SourceOutcome {
    let platform = source.platform();
    let result = match tokio::time::timeout(deadline, source.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(AppError::source_timeout(platform.label(), deadline.as_secs())),
    };

    match result {
        Ok(candidates) => {
            debug!("{} produced {} candidates", platform, candidates.len());
            SourceOutcome::Fetched {
                platform,
                candidates,
            }
        }
        Err(error) => {
            if source.quiet_failures() {
                debug!("{} unavailable, skipping: {}", platform, error);
            } else {
                warn!(
                    "{} fetch failed ({}), continuing without it: {}",
                    platform,
                    source.endpoint(),
                    error
                );
            }
            SourceOutcome::Failed { platform, error }
        }
    }
}

/// Runs every source concurrently and waits for all of them to settle.
///
/// Never fails fast: each source contributes exactly one outcome, in the same
/// order as `sources`.
#[instrument(skip(sources), fields(sources = sources.len()))]
pub async fn collect_outcomes(sources: &[SharedSource], deadline: Duration) -> Vec<SourceOutcome> {
    join_all(
        sources
            .iter()
            .map(|source| run_source(source.as_ref(), deadline)),
    )
    .await
}

/// Drops later records whose `(url, name, start millis)` was already seen.
pub fn dedup_contests(contests: Vec<Contest>) -> Vec<Contest> {
    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(contests.len());
    contests
        .into_iter()
        .filter(|contest| {
            let fresh = seen.insert(contest.dedup_key());
            if !fresh {
                debug!("Dropping duplicate contest {}", contest.id);
            }
            fresh
        })
        .collect()
}

/// Validates, deduplicates and sorts candidates into the final contest set.
///
/// The result is ordered by ascending start time; ties keep source order.
pub fn merge_candidates<I>(candidates: I) -> Vec<Contest>
where
    I: IntoIterator<Item = ContestCandidate>,
{
    let valid: Vec<Contest> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let platform = candidate.platform;
            let name = candidate.name.clone();
            match Contest::try_from(candidate) {
                Ok(contest) => Some(contest),
                Err(reason) => {
                    debug!("Dropping invalid {} contest '{}': {}", platform, name, reason);
                    None
                }
            }
        })
        .filter(|contest| match contest.validate() {
            Ok(()) => true,
            Err(reason) => {
                debug!("Dropping contest {} on revalidation: {}", contest.id, reason);
                false
            }
        })
        .collect();

    let mut contests = dedup_contests(valid);
    contests.sort_by_key(|contest| contest.start_time);
    contests
}

/// Merges the outcomes of one refresh cycle.
///
/// Partial failure is tolerated. Returns [`AppError::AllSourcesFailed`] only
/// when there was at least one source and none of them succeeded.
pub fn aggregate(outcomes: Vec<SourceOutcome>) -> Result<Vec<Contest>, AppError> {
    let total = outcomes.len();
    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    if total > 0 && failed == total {
        return Err(AppError::AllSourcesFailed { count: total });
    }

    let candidates = outcomes.into_iter().flat_map(|outcome| match outcome {
        SourceOutcome::Fetched { candidates, .. } => candidates,
        SourceOutcome::Failed { .. } => Vec::new(),
    });
    let contests = merge_candidates(candidates);

    info!(
        "Aggregated {} contests from {} of {} sources",
        contests.len(),
        total - failed,
        total
    );
    Ok(contests)
}

/// One full refresh cycle: settle-all fetch followed by [`aggregate`].
pub async fn fetch_contests(
    sources: &[SharedSource],
    deadline: Duration,
) -> Result<Vec<Contest>, AppError> {
    let outcomes = collect_outcomes(sources, deadline).await;
    aggregate(outcomes)
}

/// Contests grouped by their status at a given instant.
///
/// `live` and `upcoming` are ordered by ascending start time, `completed` by
/// descending start time (most recent first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContestBuckets {
    pub live: Vec<Contest>,
    pub upcoming: Vec<Contest>,
    pub completed: Vec<Contest>,
}

impl ContestBuckets {
    pub fn partition(contests: &[Contest], now: DateTime<Utc>) -> Self {
        let mut buckets = ContestBuckets::default();
        for contest in contests {
            match classify(contest, now) {
                ContestStatus::Live => buckets.live.push(contest.clone()),
                ContestStatus::Upcoming => buckets.upcoming.push(contest.clone()),
                ContestStatus::Completed => buckets.completed.push(contest.clone()),
            }
        }

        buckets.live.sort_by_key(|c| c.start_time);
        buckets.upcoming.sort_by_key(|c| c.start_time);
        buckets
            .completed
            .sort_by(|a, b| b.start_time.cmp(&a.start_time));
        buckets
    }

    pub fn get(&self, status: ContestStatus) -> &[Contest] {
        match status {
            ContestStatus::Live => &self.live,
            ContestStatus::Upcoming => &self.upcoming,
            ContestStatus::Completed => &self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.live.len() + self.upcoming.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
