use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use super::ContestSource;
use super::fetch_utils::get_json;
use crate::contests::models::{CodeChefResponse, ContestCandidate, IntoCandidates, Platform};
use crate::error::AppError;

/// Adapter for the CodeChef contest list. In-progress and future contests are
/// concatenated in that order.
#[derive(Debug, Clone)]
pub struct CodeChefSource {
    client: Client,
    url: String,
}

impl CodeChefSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ContestSource for CodeChefSource {
    fn platform(&self) -> Platform {
        Platform::CodeChef
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<ContestCandidate>, AppError> {
        let response: CodeChefResponse = get_json(&self.client, &self.url).await?;
        if let Some(status) = response.status.as_deref()
            && status != "success"
        {
            return Err(AppError::source_status(Platform::CodeChef.label(), status));
        }

        let (present, future) = (
            response.present_contests.len(),
            response.future_contests.len(),
        );
        let candidates = response.into_candidates();
        info!("CodeChef returned {present} present and {future} future contests");
        Ok(candidates)
    }
}
