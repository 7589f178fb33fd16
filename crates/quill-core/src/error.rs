//! Domain-level error types.

use thiserror::Error;

/// Failures a post lifecycle operation can hit before it is flattened
/// into an [`ActionOutcome`](crate::lifecycle::ActionOutcome).
///
/// None of these cross the lifecycle boundary as errors; the manager maps
/// each variant to a user-facing message.
#[derive(Debug, Error)]
pub enum PostActionError {
    #[error("no authenticated session")]
    NotAuthenticated,

    #[error("required field missing or empty")]
    ValidationFailed,

    #[error("slug already taken: {0}")]
    DuplicateSlug(String),

    #[error("post {0} not found")]
    NotFound(i32),

    #[error("post {0} is owned by another account")]
    NotOwner(i32),

    #[error(transparent)]
    Storage(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
