//! OMDb API client
//!
//! Title lookups with a request timeout, a minimum interval between requests
//! and bounded retry on transient failures.

use super::MovieSource;
use crate::utils::{retry_with_backoff, RetryPolicy};
use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const USER_AGENT: &str = "oscars-ranker/0.1.0";

/// OMDb client errors
#[derive(Debug, Error)]
pub enum MovieSourceError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid API key")]
    InvalidApiKey,
}

impl MovieSourceError {
    /// Transport failures and server-side statuses are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            MovieSourceError::NetworkError(_) => true,
            MovieSourceError::ApiError(status, _) => *status >= 500 || *status == 429,
            MovieSourceError::ParseError(_) | MovieSourceError::InvalidApiKey => false,
        }
    }
}

/// Connection settings for [`OmdbClient`]
#[derive(Debug, Clone)]
pub struct OmdbSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub min_request_interval: Duration,
    pub retry: RetryPolicy,
}

/// Spaces consecutive requests by a minimum interval
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("OMDb rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// OMDb API client
pub struct OmdbClient {
    http_client: reqwest::Client,
    rate_limiter: RateLimiter,
    settings: OmdbSettings,
}

impl OmdbClient {
    pub fn new(settings: OmdbSettings) -> Result<Self, MovieSourceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| MovieSourceError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: RateLimiter::new(settings.min_request_interval),
            settings,
        })
    }

    /// Query parameters for a title lookup
    fn query_params<'a>(&'a self, title: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("apikey", self.settings.api_key.as_str()),
            ("t", title),
            ("type", "movie"),
        ]
    }

    async fn lookup_once(&self, title: &str) -> Result<Value, MovieSourceError> {
        self.rate_limiter.wait().await;

        tracing::debug!(title = %title, "Querying OMDb API");

        let response = self
            .http_client
            .get(&self.settings.base_url)
            .query(&self.query_params(title))
            .send()
            .await
            .map_err(|e| MovieSourceError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == 401 {
            return Err(MovieSourceError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MovieSourceError::ApiError(status.as_u16(), error_text));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| MovieSourceError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    async fn lookup(&self, title: &str) -> Result<Value, MovieSourceError> {
        retry_with_backoff(
            "omdb lookup",
            self.settings.retry,
            MovieSourceError::is_retryable,
            || self.lookup_once(title),
        )
        .await
    }
}
