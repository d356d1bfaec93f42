//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`quotes`] - placement price quotes
//! - [`orders`] - order lifecycle (create, read, transitions)
//! - [`messages`] - order message threads

pub mod health;
pub mod messages;
pub mod orders;
pub mod quotes;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(quotes::router())
        .merge(orders::router())
        .merge(messages::router())
}
