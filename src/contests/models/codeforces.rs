use super::common::{IntoCandidates, end_from_duration, from_epoch_seconds};
use super::contest::ContestCandidate;
use super::platform::Platform;
use serde::{Deserialize, Serialize};

/// Envelope returned by `contest.list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeforcesResponse {
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub result: Vec<CodeforcesContest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeforcesContest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "durationSeconds", default)]
    pub duration_seconds: Option<i64>,
    #[serde(rename = "startTimeSeconds", default)]
    pub start_time_seconds: Option<i64>,
}

impl CodeforcesResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

impl IntoCandidates for CodeforcesResponse {
    fn into_candidates(self) -> Vec<ContestCandidate> {
        self.result
            .into_iter()
            .map(|contest| {
                let start = contest.start_time_seconds.and_then(from_epoch_seconds);
                ContestCandidate {
                    platform: Platform::Codeforces,
                    native_id: contest.id.map(|id| id.to_string()),
                    url: contest
                        .id
                        .map(|id| format!("https://codeforces.com/contests/{id}"))
                        .unwrap_or_default(),
                    name: contest.name,
                    start,
                    end: end_from_duration(start, contest.duration_seconds),
                }
            })
            .collect()
    }
}
