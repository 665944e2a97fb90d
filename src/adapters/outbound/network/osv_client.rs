use super::response_cache::{CacheKey, ResponseCache};
use crate::ports::outbound::{HttpTransport, SourceResponse, VulnerabilitySource};
use crate::shared::Result;
use crate::vulnerability_tracking::domain::{BatchQuery, PackageQuery};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// OSV API client for fetching vulnerability data
///
/// Every outbound call is memoized in a bounded LRU cache keyed on the exact
/// endpoint and the exact serialized payload.
///
/// # Caching policy
/// - Responses are cached whatever their HTTP status. A failed call is
///   replayed verbatim for identical requests until its entry is evicted.
/// - Transport errors carry no response and are never cached.
/// - The lookup and the later insert take the lock separately, so two
///   concurrent misses on one key may both reach the source.
///
/// Does not retry failed requests.
pub struct OsvClient<T: HttpTransport> {
    transport: T,
    base_url: String,
    cache: Mutex<ResponseCache>,
}

impl<T: HttpTransport> OsvClient<T> {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.osv.dev/v1/";
    const QUERY_PATH: &'static str = "query";
    const QUERY_BATCH_PATH: &'static str = "querybatch";

    /// Creates a client against `base_url` with a cache of `cache_capacity` entries
    pub fn new(transport: T, base_url: &str, cache_capacity: usize) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Self {
            transport,
            base_url,
            cache: Mutex::new(ResponseCache::new(cache_capacity)),
        }
    }

    /// Creates a client against the public OSV API with the default cache size
    pub fn with_defaults(transport: T) -> Self {
        Self::new(
            transport,
            Self::DEFAULT_BASE_URL,
            ResponseCache::DEFAULT_CAPACITY,
        )
    }

    pub fn batch_endpoint(&self) -> String {
        format!("{}{}", self.base_url, Self::QUERY_BATCH_PATH)
    }

    pub fn single_endpoint(&self) -> String {
        format!("{}{}", self.base_url, Self::QUERY_PATH)
    }

    /// Returns the current cache size (for testing/monitoring)
    pub fn cache_size(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, ResponseCache> {
        // The cache holds plain data; a panicked holder cannot leave it torn
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn cached_post(&self, endpoint: String, payload: String) -> Result<SourceResponse> {
        let key = CacheKey::new(&endpoint, &payload);

        let cached = self.lock_cache().get(&key);
        if let Some(cached) = cached {
            tracing::debug!(%endpoint, status = cached.status, "vulnerability source cache hit");
            return Ok(cached);
        }

        tracing::debug!(%endpoint, "vulnerability source cache miss");
        let response = self.transport.post_json(&endpoint, payload).await?;

        if !response.is_success() {
            tracing::warn!(
                %endpoint,
                status = response.status,
                "vulnerability source returned a failure status, caching it as-is"
            );
        }

        self.lock_cache().put(key, response.clone());
        Ok(response)
    }
}

#[async_trait]
impl<T: HttpTransport> VulnerabilitySource for OsvClient<T> {
    async fn query_batch(&self, query: &BatchQuery) -> Result<SourceResponse> {
        let payload = serde_json::to_string(query)?;
        self.cached_post(self.batch_endpoint(), payload).await
    }

    async fn query_single(&self, query: &PackageQuery) -> Result<SourceResponse> {
        let payload = serde_json::to_string(query)?;
        self.cached_post(self.single_endpoint(), payload).await
    }
}
