//! Daily digest: one image summarising the day's news.
//!
//! Unlike the paged feed, this fetch retries transport failures with a
//! capped exponential backoff before giving up.

use std::time::Duration;

use crate::config::FeedConfig;
use crate::error::{classify_http_error, FeedError};
use crate::models::{DailyDigest, DigestEnvelope};
use crate::models::digest::DIGEST_SUCCESS_CODE;
use crate::traits::{Headers, HttpClient};

/// Reason used when the endpoint fails without a message.
pub const DIGEST_FETCH_FAILURE: &str = "Failed to fetch the daily digest";

/// How often and how patiently to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self {
            retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (0-based): `min(base * 2^attempt, max)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

pub struct DailyDigestClient<C: HttpClient> {
    client: C,
    endpoint: String,
    timeout_secs: u64,
    policy: RetryPolicy,
}

impl<C: HttpClient> DailyDigestClient<C> {
    pub fn new(client: C, config: &FeedConfig) -> Self {
        Self {
            client,
            endpoint: config.digest_endpoint.clone(),
            timeout_secs: config.request_timeout.as_secs(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch today's digest, retrying retryable failures.
    pub async fn fetch(&self) -> Result<DailyDigest, FeedError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(digest) => return Ok(digest),
                Err(err) if err.is_retryable() && attempt < self.policy.retries => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        ?delay,
                        error = %err,
                        "daily digest fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "daily digest fetch failed");
                    return Err(err);
                }
            }
        }
    }

    async fn fetch_once(&self) -> Result<DailyDigest, FeedError> {
        let response = self
            .client
            .get(&self.endpoint, &Headers::new())
            .await
            .map_err(|e| classify_http_error(e, self.timeout_secs))?;

        if !response.is_success() {
            return Err(FeedError::TransportFailure {
                message: format!("HTTP {}", response.status),
            });
        }

        let envelope: DigestEnvelope = response.json()?;
        match envelope {
            DigestEnvelope {
                code: DIGEST_SUCCESS_CODE,
                data: Some(data),
                ..
            } => Ok(DailyDigest {
                image_url: data.imageurl,
            }),
            DigestEnvelope { message, .. } => Err(FeedError::Application {
                reason: message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DIGEST_FETCH_FAILURE.to_string()),
            }),
        }
    }
}
