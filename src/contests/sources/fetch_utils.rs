//! Generic JSON fetching with retry logic and status classification

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::constants::retry::{INITIAL_BACKOFF_MS, MAX_RETRIES};
use crate::error::AppError;

/// Fetches `url` with a GET request and parses the JSON body.
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    fetch(url, || client.get(url)).await
}

/// Sends `body` as JSON with a POST request and parses the JSON response.
pub async fn post_json<T, B>(client: &Client, url: &str, body: &B) -> Result<T, AppError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized + Sync,
{
    fetch(url, || client.post(url).json(body)).await
}

/// Maps a non-success HTTP status onto a specific error variant.
fn status_error(status: StatusCode, url: &str) -> AppError {
    let status_code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    }
}

fn request_error(e: reqwest::Error, url: &str) -> AppError {
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Shared request loop.
///
/// - Retries errors that [`AppError::is_retryable`] accepts, with exponential backoff
/// - Respects Retry-After headers for rate limiting
/// - Maps final HTTP status codes onto specific error variants
/// - Distinguishes empty bodies, non-JSON bodies and unexpected JSON structure
///
/// Final failures are logged at debug level only. The caller decides how loudly
/// a failed source is reported.
#[instrument(skip(build_request))]
async fn fetch<T, F>(url: &str, build_request: F) -> Result<T, AppError>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    info!("Fetching data from URL: {url}");

    let mut attempt = 0u32;
    let mut backoff = Duration::from_millis(INITIAL_BACKOFF_MS);
    let response = loop {
        let (error, retry_after) = match build_request().send().await {
            Ok(resp) if resp.status().is_success() => break resp,
            Ok(resp) => {
                let retry_after = resp
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                (status_error(resp.status(), url), retry_after)
            }
            Err(e) => (request_error(e, url), None),
        };

        if !error.is_retryable() || attempt >= MAX_RETRIES {
            debug!("Request failed for URL {}: {}", url, error);
            return Err(error);
        }

        let wait = retry_after.unwrap_or(backoff);
        warn!(
            "{}. Retrying in {:?} (attempt {}/{})",
            error,
            wait,
            attempt + 1,
            MAX_RETRIES
        );
        tokio::time::sleep(wait).await;
        attempt += 1;
        backoff = backoff.saturating_mul(2);
    };

    debug!("Response status: {}", response.status());

    let response_text = response.text().await.map_err(|e| {
        debug!("Failed to read response text from URL {}: {}", url, e);
        AppError::ApiFetch(e)
    })?;

    debug!("Response length: {} bytes", response_text.len());

    parse_body(&response_text, url)
}

/// Parses a response body, classifying failures by how the body looks.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            debug!("Failed to parse API response: {} (URL: {})", e, url);
            debug!(
                "Response text (first 200 chars): {}",
                body.chars().take(200).collect::<String>()
            );

            let trimmed = body.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::api_malformed_json("Response is not valid JSON", url))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contests::sources::http_client::create_test_http_client;
    use serde::Deserialize;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: i32,
    }

    #[test]
    fn test_parse_body_classifies_failures() {
        assert!(matches!(
            parse_body::<Payload>("", "u"),
            Err(AppError::ApiNoData { .. })
        ));
        assert!(matches!(
            parse_body::<Payload>("<html>blocked</html>", "u"),
            Err(AppError::ApiMalformedJson { .. })
        ));
        assert!(matches!(
            parse_body::<Payload>(r#"{"other": 1}"#, "u"),
            Err(AppError::ApiUnexpectedStructure { .. })
        ));
        assert_eq!(
            parse_body::<Payload>(r#"{"value": 7}"#, "u").unwrap(),
            Payload { value: 7 }
        );
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"value": 42}"#))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/data", server.uri());
        let payload: Payload = get_json(&client, &url).await.unwrap();
        assert_eq!(payload.value, 42);
    }

    #[tokio::test]
    async fn test_post_json_sends_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_json(serde_json::json!({"query": "{ ping }"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"value": 1}"#))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/graphql", server.uri());
        let body = serde_json::json!({"query": "{ ping }"});
        let payload: Payload = post_json(&client, &url, &body).await.unwrap();
        assert_eq!(payload.value, 1);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_specific_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/missing", server.uri());
        let result: Result<Payload, _> = get_json(&client, &url).await;
        assert!(matches!(result, Err(AppError::ApiNotFound { .. })));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/forbidden", server.uri());
        let result: Result<Payload, _> = get_json(&client, &url).await;
        assert!(matches!(
            result,
            Err(AppError::ApiClientError { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"value": 3}"#))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/flaky", server.uri());
        let payload: Payload = get_json(&client, &url).await.unwrap();
        assert_eq!(payload.value, 3);
    }
}
