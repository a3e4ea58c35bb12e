use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::cache::entry::Entry;
use crate::resilience::retry::BackoffPolicy;

/// Expected origin response body. Extra fields are ignored; wrong field
/// types are a parse error.
#[derive(Debug, Deserialize)]
struct OriginItem {
    content: String,
    expires_in: i64,
}

/// Fetches the latest value of a named resource from the origin.
///
/// `fetch` never returns an error: transport failures, timeouts, non-2xx
/// statuses, and malformed payloads are all treated as transient and retried
/// with capped exponential backoff, forever. It stops only by succeeding or
/// by the owning task being cancelled at an await point.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base_url: String,
    timeout: Duration,
    backoff: BackoffPolicy,
}

impl Fetcher {
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration, backoff: BackoffPolicy) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
            backoff,
        }
    }

    fn item_url(&self, name: &str) -> String {
        format!("{}/item/{}", self.base_url.trim_end_matches('/'), name)
    }

    /// Fetch `name` from the origin, retrying until it succeeds.
    pub async fn fetch(&self, name: &str) -> Arc<Entry> {
        let mut attempt: u32 = 0;
        loop {
            if attempt > 0 {
                sleep(self.backoff.delay(attempt)).await;
            }
            match self.try_fetch(name).await {
                Ok(entry) => {
                    info!("got token for '{}', expires in {}s", name, entry.ttl_seconds);
                    return Arc::new(entry);
                }
                Err(e) => {
                    warn!("fetch for '{}' failed (attempt {}): {e}", name, attempt + 1);
                    attempt += 1;
                }
            }
        }
    }

    /// One attempt against the origin. Every failure mode ends up here as an
    /// error, including a 200 with a body that does not match `OriginItem`.
    async fn try_fetch(&self, name: &str) -> Result<Entry> {
        let response = self
            .client
            .get(self.item_url(name))
            .timeout(self.timeout)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow!("origin returned {}", response.status()));
        }
        let item: OriginItem = response
            .json()
            .await
            .map_err(|e| anyhow!("malformed origin payload: {e}"))?;
        Ok(Entry::new(item.content, item.expires_in))
    }
}
