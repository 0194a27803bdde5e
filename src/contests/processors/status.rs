use crate::contests::models::Contest;
use chrono::{DateTime, Utc};

/// Where a contest sits relative to the current clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContestStatus {
    Live,
    Upcoming,
    Completed,
}

impl ContestStatus {
    pub fn heading(&self) -> &'static str {
        match self {
            ContestStatus::Live => "LIVE NOW",
            ContestStatus::Upcoming => "UPCOMING",
            ContestStatus::Completed => "COMPLETED",
        }
    }
}

/// Classifies a time window against `now`.
///
/// Both bounds are inclusive for the live window, so a contest is live at the
/// exact instant it starts and at the exact instant it ends.
pub fn classify_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> ContestStatus {
    if start > now {
        ContestStatus::Upcoming
    } else if now <= end {
        ContestStatus::Live
    } else {
        ContestStatus::Completed
    }
}

/// Classifies a contest against `now`. Never cached: call it on every render.
pub fn classify(contest: &Contest, now: DateTime<Utc>) -> ContestStatus {
    classify_window(contest.start_time, contest.end_time, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_before_start_is_upcoming() {
        assert_eq!(classify_window(at(10, 0), at(12, 0), at(9, 59)), ContestStatus::Upcoming);
    }

    #[test]
    fn test_window_bounds_are_live() {
        assert_eq!(classify_window(at(10, 0), at(12, 0), at(10, 0)), ContestStatus::Live);
        assert_eq!(classify_window(at(10, 0), at(12, 0), at(11, 0)), ContestStatus::Live);
        assert_eq!(classify_window(at(10, 0), at(12, 0), at(12, 0)), ContestStatus::Live);
    }

    #[test]
    fn test_after_end_is_completed() {
        assert_eq!(
            classify_window(at(10, 0), at(12, 0), at(12, 0) + Duration::seconds(1)),
            ContestStatus::Completed
        );
    }

    #[test]
    fn test_exactly_one_status_for_sweep_of_instants() {
        let start = at(10, 0);
        let end = at(11, 0);
        for offset in -90..=90 {
            let now = start + Duration::minutes(offset);
            let status = classify_window(start, end, now);
            match status {
                ContestStatus::Upcoming => assert!(start > now),
                ContestStatus::Live => assert!(start <= now && now <= end),
                ContestStatus::Completed => assert!(now > end),
            }
        }
    }

    #[test]
    fn test_headings() {
        assert_eq!(ContestStatus::Live.heading(), "LIVE NOW");
        assert_eq!(ContestStatus::Completed.heading(), "COMPLETED");
    }
}
