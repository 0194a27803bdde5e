use super::contest::ContestCandidate;
use chrono::{DateTime, Utc};

/// Source payloads that normalize into contest candidates.
pub trait IntoCandidates {
    fn into_candidates(self) -> Vec<ContestCandidate>;
}

/// Converts a Unix timestamp in seconds, rejecting out-of-range values.
pub fn from_epoch_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// `start + seconds`; a negative duration yields an end before the start,
/// which validation rejects later.
pub fn end_from_duration(
    start: Option<DateTime<Utc>>,
    seconds: Option<i64>,
) -> Option<DateTime<Utc>> {
    let start = start?;
    start.checked_add_signed(chrono::Duration::try_seconds(seconds?)?)
}

/// Parses an RFC 3339 timestamp with any offset into UTC.
pub fn parse_iso_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Unparseable timestamp '{}': {}", value, e);
            None
        }
    }
}
