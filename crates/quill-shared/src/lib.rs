//! # Quill Shared
//!
//! Types crossing the HTTP boundary: request/response DTOs and the uniform
//! success/error wrappers. Kept separate so a future client crate can reuse
//! them without pulling in the server.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
