//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM persistence, JWT session handling, Argon2 password hashing,
//! and the in-memory rendered-view cache.

pub mod auth;
pub mod database;
pub mod views;

pub use auth::{Argon2PasswordService, JwtSessionGate, JwtTokenService};
pub use sea_orm::DbConn;
pub use database::{connect, DatabaseConfig, SeaOrmAccountRepository, SeaOrmPostRepository};
pub use views::InMemoryViewCache;
