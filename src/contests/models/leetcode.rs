use super::common::{IntoCandidates, end_from_duration, from_epoch_seconds};
use super::contest::ContestCandidate;
use super::platform::Platform;
use crate::constants::endpoints::LEETCODE_CONTESTS_QUERY;
use serde::{Deserialize, Serialize};

/// GraphQL request body
#[derive(Debug, Clone, Serialize)]
pub struct LeetCodeQuery {
    pub query: &'static str,
}

impl Default for LeetCodeQuery {
    fn default() -> Self {
        Self {
            query: LEETCODE_CONTESTS_QUERY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeResponse {
    pub data: Option<LeetCodeData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeData {
    #[serde(rename = "allContests", default)]
    pub all_contests: Vec<LeetCodeContest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeContest {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "titleSlug", default)]
    pub title_slug: String,
    #[serde(rename = "startTime", default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
}

impl IntoCandidates for LeetCodeResponse {
    fn into_candidates(self) -> Vec<ContestCandidate> {
        self.data
            .map(|data| data.all_contests)
            .unwrap_or_default()
            .into_iter()
            .map(|contest| {
                let slug = contest.title_slug.trim().to_string();
                let start = contest.start_time.and_then(from_epoch_seconds);
                ContestCandidate {
                    platform: Platform::LeetCode,
                    url: if slug.is_empty() {
                        String::new()
                    } else {
                        format!("https://leetcode.com/contest/{slug}")
                    },
                    native_id: (!slug.is_empty()).then_some(slug),
                    name: contest.title,
                    start,
                    end: end_from_duration(start, contest.duration),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_body_shape() {
        let body = serde_json::to_value(LeetCodeQuery::default()).unwrap();
        assert_eq!(
            body["query"],
            "{ allContests { title titleSlug startTime duration } }"
        );
    }

    #[test]
    fn test_deserialize_all_contests() {
        let json = r#"{"data": {"allContests": [
            {"title": "Weekly Contest 390", "titleSlug": "weekly-contest-390",
             "startTime": 1711247400, "duration": 5400}
        ]}}"#;
        let response: LeetCodeResponse = serde_json::from_str(json).unwrap();
        let candidates = response.into_candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://leetcode.com/contest/weekly-contest-390");
        assert_eq!(candidates[0].native_id.as_deref(), Some("weekly-contest-390"));
        assert_eq!(
            candidates[0].end.unwrap() - candidates[0].start.unwrap(),
            chrono::Duration::minutes(90)
        );
    }

    #[test]
    fn test_null_data_yields_nothing() {
        let response: LeetCodeResponse =
            serde_json::from_str(r#"{"data": null, "errors": [{"message": "nope"}]}"#).unwrap();
        assert!(response.into_candidates().is_empty());
    }
}
