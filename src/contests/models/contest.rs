use super::platform::Platform;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Normalized record produced by a source adapter before validation.
///
/// Timestamps are `None` when the source value was missing or did not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestCandidate {
    pub platform: Platform,
    pub native_id: Option<String>,
    pub name: String,
    pub url: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Reasons a record is rejected from the aggregate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidContest {
    #[error("contest name is empty")]
    EmptyName,
    #[error("contest url is empty")]
    EmptyUrl,
    #[error("start time is missing or invalid")]
    InvalidStart,
    #[error("end time is missing or invalid")]
    InvalidEnd,
    #[error("end time is before start time")]
    EndBeforeStart,
}

/// One competitive programming event from any supported platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    pub id: String,
    pub platform: Platform,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub url: String,
}

/// Identity used to drop duplicates within one aggregation cycle.
pub type DedupKey = (String, String, i64);

impl Contest {
    /// Checks the record invariants: non-empty name and url, `end_time >= start_time`.
    pub fn validate(&self) -> Result<(), InvalidContest> {
        check_text(&self.name, &self.url)?;
        if self.end_time < self.start_time {
            return Err(InvalidContest::EndBeforeStart);
        }
        Ok(())
    }

    pub fn dedup_key(&self) -> DedupKey {
        (
            self.url.clone(),
            self.name.clone(),
            self.start_time.timestamp_millis(),
        )
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}

fn check_text(name: &str, url: &str) -> Result<(), InvalidContest> {
    if name.trim().is_empty() {
        return Err(InvalidContest::EmptyName);
    }
    if url.trim().is_empty() {
        return Err(InvalidContest::EmptyUrl);
    }
    Ok(())
}

impl TryFrom<ContestCandidate> for Contest {
    type Error = InvalidContest;

    fn try_from(candidate: ContestCandidate) -> Result<Self, Self::Error> {
        check_text(&candidate.name, &candidate.url)?;
        let start_time = candidate.start.ok_or(InvalidContest::InvalidStart)?;
        let end_time = candidate.end.ok_or(InvalidContest::InvalidEnd)?;
        if end_time < start_time {
            return Err(InvalidContest::EndBeforeStart);
        }

        let id = match candidate.native_id.as_deref().map(str::trim) {
            Some(native) if !native.is_empty() => {
                format!("{}-{}", candidate.platform.slug(), native)
            }
            _ => format!(
                "{}-{}-{}",
                candidate.platform.slug(),
                candidate.name.trim(),
                start_time.timestamp()
            ),
        };

        Ok(Contest {
            id,
            platform: candidate.platform,
            name: candidate.name.trim().to_string(),
            start_time,
            end_time,
            url: candidate.url.trim().to_string(),
        })
    }
}
