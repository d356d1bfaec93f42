//! Order API Module
//!
//! | Path | Method | Actor |
//! |------|--------|-------|
//! | /api/orders | POST | merchant (charge + create) |
//! | /api/orders | GET | merchant (list own orders) |
//! | /api/orders/{id} | GET | merchant / support |
//! | /api/orders/{id}/assets | POST | merchant |
//! | /api/orders/{id}/advance | POST | support |
//! | /api/orders/{id}/finalize | POST | support |
//! | /api/orders/{id}/override | POST | support |
//! | /api/orders/{id}/view | POST | merchant |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", post(handler::create).get(handler::list))
        .route("/api/orders/{id}", get(handler::get_by_id))
        .route("/api/orders/{id}/assets", post(handler::submit_assets))
        .route("/api/orders/{id}/advance", post(handler::advance))
        .route("/api/orders/{id}/finalize", post(handler::finalize))
        .route("/api/orders/{id}/override", post(handler::override_status))
        .route("/api/orders/{id}/view", post(handler::acknowledge_view))
}
