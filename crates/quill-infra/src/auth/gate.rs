//! Session gate backed by the JWT token service.

use std::sync::Arc;

use async_trait::async_trait;

use quill_core::domain::Session;
use quill_core::ports::{SessionGate, TokenService};

/// Resolves sessions by validating the cookie's JWT. A missing or rejected
/// token yields `None`; rejection details go to the debug log only.
pub struct JwtSessionGate {
    tokens: Arc<dyn TokenService>,
}

impl JwtSessionGate {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl SessionGate for JwtSessionGate {
    async fn session(&self, token: Option<&str>) -> Option<Session> {
        let token = token?;
        match self.tokens.validate_token(token) {
            Ok(claims) => Some(Session {
                account_id: claims.account_id,
                name: claims.name,
                email: claims.email,
            }),
            Err(err) => {
                tracing::debug!(error = %err, "session token rejected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::auth::{JwtConfig, JwtTokenService};

    fn gate() -> (JwtSessionGate, Arc<JwtTokenService>) {
        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "test".to_string(),
        }));
        (JwtSessionGate::new(tokens.clone()), tokens)
    }

    #[tokio::test]
    async fn valid_token_resolves_to_session() {
        let (gate, tokens) = gate();
        let account_id = Uuid::new_v4();
        let token = tokens
            .generate_token(account_id, "Ada", "ada@example.com")
            .unwrap();

        let session = gate.session(Some(&token)).await.unwrap();

        assert_eq!(session.account_id, account_id);
        assert_eq!(session.email, "ada@example.com");
    }

    #[tokio::test]
    async fn missing_or_garbage_token_is_no_session() {
        let (gate, _) = gate();

        assert!(gate.session(None).await.is_none());
        assert!(gate.session(Some("not-a-jwt")).await.is_none());
    }
}
