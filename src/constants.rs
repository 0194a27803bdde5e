//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and default endpoints
//! to improve maintainability and make the codebase more configurable.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Default upper bound for a single contest source, including retries
pub const DEFAULT_SOURCE_TIMEOUT_SECONDS: u64 = 20;

/// Default interval between automatic refreshes of the contest board
pub const DEFAULT_AUTO_REFRESH_MINUTES: u64 = 10;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Displayed when a countdown target has already passed
pub const ZERO_COUNTDOWN: &str = "00:00:00";

/// Default contest list endpoints
pub mod endpoints {
    pub const CODEFORCES_CONTESTS: &str = "https://codeforces.com/api/contest.list?gym=false";

    pub const CODECHEF_CONTESTS: &str = "https://www.codechef.com/api/list/contests/all?sort_by=START&sorting_order=asc&offset=0&mode=all";

    pub const LEETCODE_GRAPHQL: &str = "https://leetcode.com/graphql";

    /// GraphQL query sent to LeetCode
    pub const LEETCODE_CONTESTS_QUERY: &str =
        "{ allContests { title titleSlug startTime duration } }";
}

/// Retry policy for transient HTTP failures
pub mod retry {
    /// Attempts after the first request
    pub const MAX_RETRIES: u32 = 3;

    /// First backoff delay, doubled on each retry
    pub const INITIAL_BACKOFF_MS: u64 = 250;
}

/// Persistence keys used by the progress tracker
pub mod storage {
    /// Key of the global fully-completed topic counter
    pub const COMPLETED_TOPICS_KEY: &str = "completed_topics";

    /// Prefix of per-topic checklist records
    pub const TOPIC_KEY_PREFIX: &str = "progress:";

    /// File name of the JSON key/value store inside the data directory
    pub const STORE_FILE_NAME: &str = "progress.json";
}

/// UI timing and layout constants
pub mod ui {
    /// Rows shown per bucket before "show more"
    pub const PAGE_SIZE: usize = 5;

    /// Countdown redraw period
    pub const TICK_MS: u64 = 1000;

    /// Event poll timeout inside the interactive loop
    pub const POLL_MS: u64 = 100;

    /// Minimum seconds between manual refreshes
    pub const MANUAL_REFRESH_COOLDOWN_SECONDS: u64 = 10;

    /// Content margin from terminal border
    pub const CONTENT_MARGIN: usize = 2;

    /// Column width reserved for contest names
    pub const NAME_COLUMN_WIDTH: usize = 44;
}
