use serde::Serialize;
use uuid::Uuid;

/// The authenticated identity for the current request, produced by the
/// session gate. Never persisted; absence of a session is a normal outcome,
/// not an error.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
}

/// The slice of the incoming request the lifecycle manager needs: the raw
/// session token from the cookie, if one was sent at all.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub session_token: Option<String>,
}

impl RequestContext {
    pub fn new(session_token: Option<String>) -> Self {
        Self { session_token }
    }

    /// A context with no session attached.
    pub fn anonymous() -> Self {
        Self::default()
    }
}
