//! Message API Module
//!
//! Thread access for an order: human posts and ordered reads. Automated
//! System messages are never posted here; they are transition side
//! effects owned by the lifecycle manager.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Message router
pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/orders/{id}/messages",
        get(handler::list).post(handler::post_message),
    )
}
