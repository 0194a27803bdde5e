pub mod codechef;
pub mod codeforces;
pub mod common;
pub mod contest;
pub mod leetcode;
pub mod platform;

pub use codechef::{CodeChefContest, CodeChefResponse};
pub use codeforces::{CodeforcesContest, CodeforcesResponse};
pub use common::IntoCandidates;
pub use contest::{Contest, ContestCandidate, DedupKey, InvalidContest};
pub use leetcode::{LeetCodeContest, LeetCodeQuery, LeetCodeResponse};
pub use platform::Platform;
