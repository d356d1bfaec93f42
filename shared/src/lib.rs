//! Shared types for the sponsored placement service
//!
//! Domain models, the typed error taxonomy, and small utilities used by
//! both the server crate and its integration tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{CoreError, CoreResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
