//! Contest source adapters.
//!
//! Each adapter wraps one external contest list API and maps its payload onto
//! [`ContestCandidate`]s. Adding a platform means adding one adapter and one
//! arm in [`build_sources`]; the aggregator only sees the [`ContestSource`] trait.

pub mod codechef;
pub mod codeforces;
pub mod fetch_utils;
pub mod http_client;
pub mod leetcode;

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use crate::config::Config;
use crate::contests::models::{ContestCandidate, Platform};
use crate::error::AppError;

pub use codechef::CodeChefSource;
pub use codeforces::CodeforcesSource;
pub use http_client::create_http_client_with_timeout;
pub use leetcode::LeetCodeSource;

/// Capability shared by every contest list integration.
#[async_trait]
pub trait ContestSource: Send + Sync {
    fn platform(&self) -> Platform;

    fn endpoint(&self) -> &str;

    /// Fetches and normalizes the source's contest list. Individual malformed
    /// items are returned as-is and rejected later by validation.
    async fn fetch(&self) -> Result<Vec<ContestCandidate>, AppError>;

    /// Whether failures of this source are expected and logged at debug level only.
    fn quiet_failures(&self) -> bool {
        false
    }
}

pub type SharedSource = Arc<dyn ContestSource>;

/// Result of running one source inside a refresh cycle.
#[derive(Debug)]
pub enum SourceOutcome {
    Fetched {
        platform: Platform,
        candidates: Vec<ContestCandidate>,
    },
    Failed {
        platform: Platform,
        error: AppError,
    },
}

impl SourceOutcome {
    pub fn platform(&self) -> Platform {
        match self {
            SourceOutcome::Fetched { platform, .. } | SourceOutcome::Failed { platform, .. } => {
                *platform
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SourceOutcome::Failed { .. })
    }
}

/// Instantiates an adapter for every source enabled in `config`, sharing `client`.
pub fn build_sources(config: &Config, client: &Client) -> Vec<SharedSource> {
    config
        .sources
        .enabled_platforms()
        .into_iter()
        .map(|platform| {
            let url = config.sources.url_for(platform);
            let source: SharedSource = match platform {
                Platform::Codeforces => Arc::new(CodeforcesSource::new(client.clone(), url)),
                Platform::CodeChef => Arc::new(CodeChefSource::new(client.clone(), url)),
                Platform::LeetCode => Arc::new(LeetCodeSource::new(client.clone(), url)),
            };
            source
        })
        .collect()
}

/// Creates the HTTP client from `config` and builds every enabled source.
pub fn create_sources(config: &Config) -> Result<Vec<SharedSource>, AppError> {
    let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
    Ok(build_sources(config, &client))
}
