//! Quote API Module
//!
//! Read-only pricing preview; nothing is persisted until an order is
//! created.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Quote router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/quotes", get(handler::get_quote))
}
