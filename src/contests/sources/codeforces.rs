use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use super::ContestSource;
use super::fetch_utils::get_json;
use crate::contests::models::{CodeforcesResponse, ContestCandidate, IntoCandidates, Platform};
use crate::error::AppError;

/// Adapter for the Codeforces `contest.list` endpoint.
#[derive(Debug, Clone)]
pub struct CodeforcesSource {
    client: Client,
    url: String,
}

impl CodeforcesSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ContestSource for CodeforcesSource {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<ContestCandidate>, AppError> {
        let response: CodeforcesResponse = get_json(&self.client, &self.url).await?;
        if !response.is_ok() {
            let status = match &response.comment {
                Some(comment) => format!("{}: {}", response.status, comment),
                None => response.status.clone(),
            };
            return Err(AppError::source_status(Platform::Codeforces.label(), status));
        }

        let candidates = response.into_candidates();
        info!("Codeforces returned {} contests", candidates.len());
        Ok(candidates)
    }
}
