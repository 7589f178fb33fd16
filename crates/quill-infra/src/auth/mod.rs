//! Session token and password hashing implementations.

mod gate;
mod jwt;
mod password;

pub use gate::JwtSessionGate;
pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
