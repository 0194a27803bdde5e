use crate::constants::ZERO_COUNTDOWN;
use chrono::{DateTime, Local, Utc};

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

/// Formats the time left until `target`.
///
/// - target already reached: `"00:00:00"`
/// - at least one day left: `"{days}d {hours}h {minutes}m"`
/// - otherwise: zero padded `"HH:MM:SS"`
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use cp_companion::contests::processors::format_time_remaining;
///
/// let now = Utc::now();
/// assert_eq!(format_time_remaining(now + Duration::seconds(90_061), now), "1d 1h 1m");
/// assert_eq!(format_time_remaining(now + Duration::seconds(3_661), now), "01:01:01");
/// assert_eq!(format_time_remaining(now - Duration::seconds(5), now), "00:00:00");
/// ```
pub fn format_time_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = (target - now).num_seconds();
    if remaining <= 0 {
        return ZERO_COUNTDOWN.to_string();
    }

    if remaining >= SECONDS_PER_DAY {
        let days = remaining / SECONDS_PER_DAY;
        let hours = (remaining % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
        let minutes = (remaining % SECONDS_PER_HOUR) / 60;
        format!("{days}d {hours}h {minutes}m")
    } else {
        let hours = remaining / SECONDS_PER_HOUR;
        let minutes = (remaining % SECONDS_PER_HOUR) / 60;
        let seconds = remaining % 60;
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Formats a contest length, e.g. `"2h 15m"`, `"3d 4h"` or `"45m"`.
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let total_minutes = (end - start).num_minutes().max(0);
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    match (days, hours, minutes) {
        (0, 0, m) => format!("{m}m"),
        (0, h, 0) => format!("{h}h"),
        (0, h, m) => format!("{h}h {m}m"),
        (d, 0, _) => format!("{d}d"),
        (d, h, _) => format!("{d}d {h}h"),
    }
}

/// Formats an instant in the local timezone as `"Thu 28.03 20:05"`.
pub fn format_start_local(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%a %d.%m %H:%M").to_string()
}

/// Formats an instant in the local timezone as `"28.03.2024"`.
pub fn format_date_local(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 28, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_days_format() {
        let now = now();
        assert_eq!(format_time_remaining(now + Duration::seconds(90_061), now), "1d 1h 1m");
        assert_eq!(format_time_remaining(now + Duration::days(1), now), "1d 0h 0m");
        assert_eq!(
            format_time_remaining(now + Duration::days(12) + Duration::minutes(59), now),
            "12d 0h 59m"
        );
    }

    #[test]
    fn test_clock_format() {
        let now = now();
        assert_eq!(format_time_remaining(now + Duration::seconds(3_661), now), "01:01:01");
        assert_eq!(format_time_remaining(now + Duration::seconds(1), now), "00:00:01");
        assert_eq!(format_time_remaining(now + Duration::seconds(86_399), now), "23:59:59");
    }

    #[test]
    fn test_passed_target_is_zero_string() {
        let now = now();
        assert_eq!(format_time_remaining(now - Duration::seconds(5), now), ZERO_COUNTDOWN);
        assert_eq!(format_time_remaining(now, now), ZERO_COUNTDOWN);
    }

    #[test]
    fn test_sub_second_remainder_truncates() {
        let now = now();
        assert_eq!(
            format_time_remaining(now + Duration::milliseconds(1_500), now),
            "00:00:01"
        );
        assert_eq!(
            format_time_remaining(now + Duration::milliseconds(400), now),
            ZERO_COUNTDOWN
        );
    }

    #[test]
    fn test_format_duration_variants() {
        let start = now();
        assert_eq!(format_duration(start, start + Duration::minutes(45)), "45m");
        assert_eq!(format_duration(start, start + Duration::hours(2)), "2h");
        assert_eq!(format_duration(start, start + Duration::minutes(135)), "2h 15m");
        assert_eq!(format_duration(start, start + Duration::days(10)), "10d");
        assert_eq!(
            format_duration(start, start + Duration::days(3) + Duration::hours(4)),
            "3d 4h"
        );
        assert_eq!(format_duration(start, start - Duration::hours(1)), "0m");
    }

    #[test]
    fn test_local_formatters_have_expected_shape() {
        let formatted = format_start_local(now());
        // "Thu 28.03 14:00" in any timezone keeps this layout
        assert_eq!(formatted.len(), 15);
        assert_eq!(format_date_local(now()).len(), 10);
    }
}
