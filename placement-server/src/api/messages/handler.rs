//! Message API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{AssetMetadata, Message, MessageKind, MessageSender};
use validator::Validate;

use crate::core::ServerState;
use crate::utils::AppResult;

/// Post-message request
#[derive(Debug, Deserialize, Validate)]
pub struct PostMessageRequest {
    pub sender: MessageSender,
    #[validate(length(min = 1))]
    pub body: String,
    #[serde(default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub metadata: Option<AssetMetadata>,
}

/// Append a message to the order's thread
///
/// System-authored messages are lifecycle side effects and cannot be
/// injected through the API.
pub async fn post_message(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PostMessageRequest>,
) -> AppResult<Json<Message>> {
    payload.validate()?;
    if payload.sender == MessageSender::System {
        return Err(shared::CoreError::invalid_payload("sender").into());
    }
    let message = state.messaging.post(
        &id,
        payload.sender,
        payload.body,
        payload.kind,
        payload.metadata,
    )?;
    Ok(Json(message))
}

/// Read the thread in append order
pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Message>>> {
    Ok(Json(state.messaging.thread(&id)?))
}
