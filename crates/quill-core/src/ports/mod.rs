//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod views;

pub use auth::{AuthError, PasswordService, SessionGate, TokenClaims, TokenService};
pub use repository::{AccountRepository, PostRepository};
pub use views::ViewCache;
