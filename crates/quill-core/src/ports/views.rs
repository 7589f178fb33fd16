use async_trait::async_trait;

/// Cache of rendered views, keyed by request path.
///
/// Mutations call [`ViewCache::mark_stale`] as a fire-and-forget hint that
/// the cached output for a path is outdated; read handlers may serve and
/// repopulate entries. Losing an entry is always safe - the next read
/// rebuilds it.
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Get the cached body for a path, if still present.
    async fn get(&self, path: &str) -> Option<String>;

    /// Store the rendered body for a path.
    async fn put(&self, path: &str, body: &str);

    /// Drop whatever is cached for the path.
    async fn mark_stale(&self, path: &str);
}
