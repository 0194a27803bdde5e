use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use super::ContestSource;
use super::fetch_utils::post_json;
use crate::contests::models::{
    ContestCandidate, IntoCandidates, LeetCodeQuery, LeetCodeResponse, Platform,
};
use crate::error::AppError;

/// Adapter for the LeetCode GraphQL `allContests` query.
///
/// The endpoint is frequently blocked for non-browser clients, so its failures
/// are reported quietly.
#[derive(Debug, Clone)]
pub struct LeetCodeSource {
    client: Client,
    url: String,
}

impl LeetCodeSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ContestSource for LeetCodeSource {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    fn quiet_failures(&self) -> bool {
        true
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<ContestCandidate>, AppError> {
        let response: LeetCodeResponse =
            post_json(&self.client, &self.url, &LeetCodeQuery::default()).await?;
        if response.data.is_none() {
            return Err(AppError::api_no_data(
                "GraphQL response has no data",
                &self.url,
            ));
        }

        let candidates = response.into_candidates();
        info!("LeetCode returned {} contests", candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contests::sources::http_client::create_test_http_client;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_posts_graphql_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_json(serde_json::json!({
                "query": "{ allContests { title titleSlug startTime duration } }"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"allContests": [
                    {"title": "Weekly Contest 390", "titleSlug": "weekly-contest-390",
                     "startTime": 1711247400, "duration": 5400}
                ]}
            })))
            .mount(&server)
            .await;

        let source = LeetCodeSource::new(
            create_test_http_client(),
            format!("{}/graphql", server.uri()),
        );
        let candidates = source.fetch().await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].platform, Platform::LeetCode);
        assert!(source.quiet_failures());
    }

    #[tokio::test]
    async fn test_missing_data_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": null, "errors": []})),
            )
            .mount(&server)
            .await;

        let source = LeetCodeSource::new(create_test_http_client(), server.uri());
        assert!(matches!(source.fetch().await, Err(AppError::ApiNoData { .. })));
    }
}
