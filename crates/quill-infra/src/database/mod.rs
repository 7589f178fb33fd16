//! SeaORM persistence - connection management, entities, repositories.

mod connections;
pub mod entity;
mod repo;

pub use connections::{connect, DatabaseConfig};
pub use repo::{SeaOrmAccountRepository, SeaOrmPostRepository};
