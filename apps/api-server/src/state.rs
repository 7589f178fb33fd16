//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use quill_core::ports::{AccountRepository, PostRepository, SessionGate, TokenService, ViewCache};
use quill_core::PostLifecycle;
use quill_infra::{
    DbConn, InMemoryViewCache, JwtSessionGate, SeaOrmAccountRepository, SeaOrmPostRepository,
};

/// How long a rendered listing may be served before it is re-rendered even
/// without an invalidation hint.
const VIEW_TTL: Duration = Duration::from_secs(60);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub views: Arc<dyn ViewCache>,
    pub lifecycle: Arc<PostLifecycle>,
}

impl AppState {
    /// Wire the repositories, session gate, view cache, and lifecycle
    /// manager around one connection pool.
    pub fn new(db: DbConn, tokens: Arc<dyn TokenService>) -> Self {
        let posts: Arc<dyn PostRepository> = Arc::new(SeaOrmPostRepository::new(db.clone()));
        let accounts: Arc<dyn AccountRepository> = Arc::new(SeaOrmAccountRepository::new(db));
        let views: Arc<dyn ViewCache> = Arc::new(InMemoryViewCache::new(Some(VIEW_TTL)));
        let gate: Arc<dyn SessionGate> = Arc::new(JwtSessionGate::new(tokens));

        let lifecycle = Arc::new(PostLifecycle::new(
            posts.clone(),
            gate,
            views.clone(),
        ));

        tracing::info!("Application state initialized");

        Self {
            accounts,
            posts,
            views,
            lifecycle,
        }
    }
}
