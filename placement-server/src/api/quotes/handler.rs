//! Quote API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::{DurationTier, PlacementScope, PriceQuote};

use crate::core::ServerState;
use crate::utils::AppResult;

/// Query params for a price quote
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub scope: PlacementScope,
    /// Number of neighborhoods targeted
    pub neighborhoods: u32,
    pub duration: DurationTier,
}

/// Price a placement configuration
pub async fn get_quote(
    State(state): State<ServerState>,
    Query(query): Query<QuoteQuery>,
) -> AppResult<Json<PriceQuote>> {
    let quote = state
        .manager
        .quote(query.scope, query.neighborhoods, query.duration)?;
    Ok(Json(quote))
}
