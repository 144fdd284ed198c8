//! Fetch-through cache over outbound JSON GETs.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::instrument;

use crate::error::FetchError;
use crate::keys::request_cache_key;
use crate::store::CacheStore;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);
pub const DEFAULT_GROUP: &str = "default";

/// Per-request knobs for [`CachedClient::get_json`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Upper bound on the whole network request.
    pub timeout: Duration,
    /// How long a fetched response stays valid in the cache.
    pub ttl: Duration,
    /// Cache group the response is stored under.
    pub group: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            ttl: DEFAULT_TTL,
            group: DEFAULT_GROUP.to_string(),
        }
    }
}

impl FetchOptions {
    /// Default options targeting a specific cache group.
    pub fn for_group(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..Self::default()
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client that answers JSON GETs from the shared [`CacheStore`]
/// before going to the network.
#[derive(Debug, Clone)]
pub struct CachedClient {
    client: reqwest::Client,
    store: Arc<CacheStore>,
}

impl CachedClient {
    pub fn new(store: Arc<CacheStore>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, store })
    }

    /// The store this client reads and writes.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// GET `url` with the given headers and query params, answering from
    /// the cache when a live entry exists for the derived key.
    ///
    /// The store lock is released during the network call, so two
    /// concurrent misses for the same key can both fetch; the last
    /// writer wins. That race is accepted rather than paying for
    /// request coalescing.
    ///
    /// A non-2xx response or transport failure surfaces as [`FetchError`]
    /// and leaves the cache untouched.
    #[instrument(skip(self, headers), level = "debug")]
    pub async fn get_json(
        &self,
        url: &str,
        headers: &HeaderMap,
        params: &[(&str, &str)],
        opts: &FetchOptions,
    ) -> Result<Value, FetchError> {
        let key = request_cache_key(url, params);
        if let Some(value) = self.store.get(&opts.group, &key) {
            return Ok(value);
        }

        // Miss: go to the network with the lock released.
        let mut request = self
            .client
            .get(url)
            .headers(headers.clone())
            .timeout(opts.timeout);
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, url, "upstream returned non-success status");
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        let body: Value = response.json().await?;

        self.store.put(&opts.group, &key, body.clone(), opts.ttl);
        Ok(body)
    }
}
