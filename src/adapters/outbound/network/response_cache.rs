use crate::ports::outbound::SourceResponse;
use std::collections::{BTreeMap, HashMap};

/// Cache key for source responses: exact endpoint plus exact serialized payload
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct CacheKey {
    endpoint: String,
    payload: String,
}

impl CacheKey {
    pub fn new(endpoint: &str, payload: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            payload: payload.to_string(),
        }
    }
}

/// Bounded least-recently-used cache of raw source responses
///
/// Entries live in a map alongside a recency index ordered by a monotonic
/// tick. Every hit or insert moves the key to the newest tick; inserting
/// past capacity evicts the oldest tick.
#[derive(Debug)]
pub struct ResponseCache {
    capacity: usize,
    tick: u64,
    entries: HashMap<CacheKey, (SourceResponse, u64)>,
    recency: BTreeMap<u64, CacheKey>,
}

impl ResponseCache {
    /// Default capacity, matching the service's default configuration
    pub const DEFAULT_CAPACITY: usize = 128;

    /// Creates an empty cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            tick: 0,
            entries: HashMap::with_capacity(capacity),
            recency: BTreeMap::new(),
        }
    }

    /// Returns a copy of the cached response and marks it most recently used
    pub fn get(&mut self, key: &CacheKey) -> Option<SourceResponse> {
        let next = self.next_tick();
        let (response, tick) = self.entries.get_mut(key)?;
        self.recency.remove(&*tick);
        *tick = next;
        self.recency.insert(next, key.clone());
        Some(response.clone())
    }

    /// Inserts or replaces an entry, evicting the least recently used one if full
    pub fn put(&mut self, key: CacheKey, response: SourceResponse) {
        let next = self.next_tick();
        if let Some((_, old_tick)) = self.entries.remove(&key) {
            self.recency.remove(&old_tick);
        } else if self.entries.len() >= self.capacity {
            if let Some((_, oldest)) = self.recency.pop_first() {
                self.entries.remove(&oldest);
            }
        }
        self.recency.insert(next, key.clone());
        self.entries.insert(key, (response, next));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(marker: &str) -> SourceResponse {
        SourceResponse::new(200, json!({ "marker": marker }))
    }

    #[test]
    fn test_get_miss_and_hit() {
        let mut cache = ResponseCache::new(2);
        let key = CacheKey::new("https://api.osv.dev/v1/query", r#"{"a":1}"#);

        assert!(cache.get(&key).is_none());
        cache.put(key.clone(), response("a"));
        assert_eq!(cache.get(&key), Some(response("a")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = ResponseCache::new(2);
        let a = CacheKey::new("e", "a");
        let b = CacheKey::new("e", "b");
        let c = CacheKey::new("e", "c");

        cache.put(a.clone(), response("a"));
        cache.put(b.clone(), response("b"));
        cache.put(c.clone(), response("c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&a).is_none());
        assert!(cache.get(&b).is_some());
        assert!(cache.get(&c).is_some());
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = ResponseCache::new(2);
        let a = CacheKey::new("e", "a");
        let b = CacheKey::new("e", "b");
        let c = CacheKey::new("e", "c");

        cache.put(a.clone(), response("a"));
        cache.put(b.clone(), response("b"));
        assert!(cache.get(&a).is_some());
        cache.put(c.clone(), response("c"));

        assert!(cache.get(&a).is_some());
        assert!(cache.get(&b).is_none());
        assert!(cache.get(&c).is_some());
    }

    #[test]
    fn test_put_existing_key_replaces_without_eviction() {
        let mut cache = ResponseCache::new(2);
        let a = CacheKey::new("e", "a");
        let b = CacheKey::new("e", "b");

        cache.put(a.clone(), response("a"));
        cache.put(b.clone(), response("b"));
        cache.put(a.clone(), response("a2"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&a), Some(response("a2")));
        assert!(cache.get(&b).is_some());
    }

    #[test]
    fn test_key_includes_endpoint() {
        let mut cache = ResponseCache::new(4);
        cache.put(CacheKey::new("batch", "payload"), response("batch"));

        assert!(cache.get(&CacheKey::new("single", "payload")).is_none());
        assert_eq!(
            cache.get(&CacheKey::new("batch", "payload")),
            Some(response("batch"))
        );
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = ResponseCache::new(0);
        assert_eq!(cache.capacity(), 1);
        assert!(cache.is_empty());
    }
}
