//! User-specific entity wiring and error types.

pub mod entity;
pub mod error;

pub use error::*;
