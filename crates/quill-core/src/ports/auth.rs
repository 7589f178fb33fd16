//! Authentication ports - session tokens, password hashing, and the
//! session gate the lifecycle manager resolves identities through.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Session;

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    pub exp: i64,
}

/// Token service for minting and validating session tokens.
pub trait TokenService: Send + Sync {
    /// Generate a session token for an account.
    fn generate_token(&self, account_id: Uuid, name: &str, email: &str)
        -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of freshly minted tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Resolves the current request's session from the raw cookie token.
///
/// Returns `None` for a missing, expired, or forged token - "not logged in"
/// is a normal outcome here, never an error.
#[async_trait]
pub trait SessionGate: Send + Sync {
    async fn session(&self, token: Option<&str>) -> Option<Session>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing session cookie")]
    MissingSession,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
