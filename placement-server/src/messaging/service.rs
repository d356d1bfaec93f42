//! MessagingService - validated appends to order threads

use crate::orders::OrderStore;
use shared::models::{AssetMetadata, Message, MessageKind, MessageSender};
use shared::{CoreError, CoreResult};
use std::sync::Arc;

/// Appends messages to order threads
///
/// Validates referential integrity (the order must exist) and, for asset
/// submissions, the structured metadata. Ordering is the store's per-order
/// sequence: readers always see messages in successful-append order.
#[derive(Clone)]
pub struct MessagingService {
    store: Arc<OrderStore>,
}

impl std::fmt::Debug for MessagingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingService").finish()
    }
}

impl MessagingService {
    pub fn new(store: Arc<OrderStore>) -> Self {
        Self { store }
    }

    /// Post a message to an order's thread
    pub fn post(
        &self,
        order_id: &str,
        sender: MessageSender,
        body: impl Into<String>,
        kind: MessageKind,
        metadata: Option<AssetMetadata>,
    ) -> CoreResult<Message> {
        if !self.store.contains(order_id) {
            return Err(CoreError::not_found(format!("Order {order_id}")));
        }

        if kind == MessageKind::AssetSubmission {
            let meta = metadata
                .as_ref()
                .ok_or_else(|| CoreError::invalid_payload("metadata"))?;
            validate_asset_metadata(meta)?;
        }

        let message = Message::new(order_id, sender, kind, body, metadata);
        let stored = self.store.append_message(message)?;
        tracing::debug!(
            order_id = %order_id,
            sequence = stored.sequence,
            sender = ?stored.sender,
            kind = ?stored.kind,
            "Message appended"
        );
        Ok(stored)
    }

    /// Post a system-authored message (lifecycle side effects)
    pub fn post_system(
        &self,
        order_id: &str,
        body: impl Into<String>,
        kind: MessageKind,
    ) -> CoreResult<Message> {
        self.post(order_id, MessageSender::System, body, kind, None)
    }

    /// The full thread for an order, in append order
    pub fn thread(&self, order_id: &str) -> CoreResult<Vec<Message>> {
        self.store.messages(order_id)
    }
}

/// Asset submissions must carry at least a store name and a headline;
/// partial data is rejected, never silently stored.
pub fn validate_asset_metadata(meta: &AssetMetadata) -> CoreResult<()> {
    if meta.store_name.trim().is_empty() {
        return Err(CoreError::invalid_payload("store_name"));
    }
    if meta.headline.trim().is_empty() {
        return Err(CoreError::invalid_payload("headline"));
    }
    Ok(())
}
