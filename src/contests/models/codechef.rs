use super::common::{IntoCandidates, parse_iso_timestamp};
use super::contest::ContestCandidate;
use super::platform::Platform;
use serde::{Deserialize, Serialize};

/// Response of the CodeChef contest list endpoint.
///
/// Only the in-progress and future lists are used; past contests are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeChefResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub present_contests: Vec<CodeChefContest>,
    #[serde(default)]
    pub future_contests: Vec<CodeChefContest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeChefContest {
    #[serde(default)]
    pub contest_code: String,
    #[serde(default)]
    pub contest_name: String,
    #[serde(default)]
    pub contest_start_date_iso: Option<String>,
    #[serde(default)]
    pub contest_end_date_iso: Option<String>,
}

impl IntoCandidates for CodeChefResponse {
    fn into_candidates(self) -> Vec<ContestCandidate> {
        self.present_contests
            .into_iter()
            .chain(self.future_contests)
            .map(|contest| {
                let code = contest.contest_code.trim().to_string();
                ContestCandidate {
                    platform: Platform::CodeChef,
                    url: if code.is_empty() {
                        String::new()
                    } else {
                        format!("https://www.codechef.com/{code}")
                    },
                    native_id: (!code.is_empty()).then_some(code),
                    name: contest.contest_name,
                    start: contest
                        .contest_start_date_iso
                        .as_deref()
                        .and_then(parse_iso_timestamp),
                    end: contest
                        .contest_end_date_iso
                        .as_deref()
                        .and_then(parse_iso_timestamp),
                }
            })
            .collect()
    }
}
