//! System startup, shutdown, and tracing setup.

pub mod user_system;
pub mod tracing;

pub use user_system::*;
pub use self::tracing::*;
