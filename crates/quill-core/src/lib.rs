//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post and account entities, the slug generator, the error taxonomy, the
//! port traits infrastructure must implement, and the post lifecycle manager.

pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod ports;

pub use error::PostActionError;
pub use lifecycle::{ActionOutcome, PostInput, PostLifecycle};
