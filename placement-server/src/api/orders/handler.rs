//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{
    AssetMetadata, DurationTier, Order, OrderKind, PaymentMethod, PlacementConfig, PlacementScope,
    ProductionStatus,
};
use validator::Validate;

use crate::core::ServerState;
use crate::orders::CreateOrderInput;
use crate::payment::charge_with_timeout;
use crate::utils::AppResult;

/// Checkout request: configuration plus payment choice
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1))]
    pub merchant_id: String,
    pub scope: PlacementScope,
    #[validate(length(min = 1))]
    pub neighborhoods: Vec<String>,
    pub duration_tier: DurationTier,
    #[serde(default)]
    pub kind: OrderKind,
    pub payment_method: PaymentMethod,
}

/// Charge the configured amount, then create the order
///
/// The order only comes into existence after the gateway confirms the
/// charge; a failed or timed-out charge leaves no state behind.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    payload.validate()?;

    let placement = PlacementConfig {
        scope: payload.scope,
        neighborhoods: payload.neighborhoods,
        duration_tier: payload.duration_tier,
    };
    let quote = state.manager.quote_for(&placement)?;
    let total = state.manager.order_total(payload.kind, &quote);

    let outcome = charge_with_timeout(
        state.payment.as_ref(),
        total,
        payload.payment_method,
        state.config.payment_timeout(),
    )
    .await?;

    let order = state.manager.create_order(
        CreateOrderInput {
            merchant_id: payload.merchant_id,
            placement,
            kind: payload.kind,
            payment_method: payload.payment_method,
        },
        &outcome,
    )?;
    Ok(Json(order))
}

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub merchant_id: String,
}

/// List a merchant's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.manager.list_orders(&query.merchant_id)))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.manager.get_order(&id)?))
}

/// Asset submission request (the merchant's creative brief)
#[derive(Debug, Deserialize)]
pub struct SubmitAssetsRequest {
    pub store_name: String,
    pub headline: String,
    #[serde(default)]
    pub ad_copy: Option<String>,
    #[serde(default)]
    pub cta_label: Option<String>,
    /// Opaque reference into asset storage
    #[serde(default)]
    pub asset_ref: Option<String>,
    /// Free-text note shown in the thread
    #[serde(default)]
    pub note: Option<String>,
}

/// Merchant submits creative assets
pub async fn submit_assets(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SubmitAssetsRequest>,
) -> AppResult<Json<Order>> {
    let metadata = AssetMetadata {
        store_name: payload.store_name,
        headline: payload.headline,
        ad_copy: payload.ad_copy,
        cta_label: payload.cta_label,
        asset_ref: payload.asset_ref,
    };
    let order = state.manager.submit_assets(&id, metadata, payload.note)?;
    Ok(Json(order))
}

/// Status advance request
#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub status: ProductionStatus,
}

/// Support advances production status one step
pub async fn advance(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AdvanceRequest>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.manager.advance_status(&id, payload.status)?))
}

/// Support finalizes the order with the thank-you message
pub async fn finalize(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.manager.finalize_with_thanks(&id)?))
}

/// Administrative override request
#[derive(Debug, Deserialize)]
pub struct OverrideRequest {
    pub status: ProductionStatus,
    pub reason: String,
}

/// Support moves an order outside the guarded lifecycle (logged)
pub async fn override_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OverrideRequest>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.manager.override_status(
        &id,
        payload.status,
        &payload.reason,
    )?))
}

/// Merchant opened the order screen; stamps the unread-badge timestamp
pub async fn acknowledge_view(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.manager.acknowledge_view(&id)?))
}
