//! In-memory rendered-view cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::ViewCache;

struct CacheEntry {
    body: String,
    expires_at: Option<Instant>,
}

/// Per-process view cache keyed by request path.
///
/// Entries age out after the configured TTL; mutations drop them early via
/// `mark_stale`. Contents are lost on restart, which is always safe - the
/// next read re-renders.
pub struct InMemoryViewCache {
    store: RwLock<HashMap<String, CacheEntry>>,
    ttl: Option<Duration>,
}

impl InMemoryViewCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }
}

#[async_trait]
impl ViewCache for InMemoryViewCache {
    async fn get(&self, path: &str) -> Option<String> {
        // Use async read lock - doesn't block the executor
        let store = self.store.read().await;
        let entry = store.get(path)?;

        if Self::is_expired(entry) {
            drop(store);
            // Clean up expired entry with write lock
            let mut store = self.store.write().await;
            store.remove(path);
            return None;
        }

        Some(entry.body.clone())
    }

    async fn put(&self, path: &str, body: &str) {
        let mut store = self.store.write().await;

        let expires_at = self.ttl.map(|d| Instant::now() + d);

        store.insert(
            path.to_string(),
            CacheEntry {
                body: body.to_string(),
                expires_at,
            },
        );
    }

    async fn mark_stale(&self, path: &str) {
        let mut store = self.store.write().await;
        store.remove(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_and_get() {
        let cache = InMemoryViewCache::new(None);
        cache.put("/", "rendered home").await;
        assert_eq!(cache.get("/").await.as_deref(), Some("rendered home"));
    }

    #[tokio::test]
    async fn mark_stale_drops_the_entry() {
        let cache = InMemoryViewCache::new(None);
        cache.put("/post/hello-world", "rendered post").await;
        cache.mark_stale("/post/hello-world").await;
        assert_eq!(cache.get("/post/hello-world").await, None);
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = InMemoryViewCache::new(Some(Duration::from_millis(1)));
        cache.put("/", "rendered home").await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(cache.get("/").await, None);
    }
}
