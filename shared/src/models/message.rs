//! Order thread messages - append-only facts, never edited or deleted

use crate::util::{new_id, now_millis};
use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageSender {
    Merchant,
    SupportTeam,
    System,
}

/// Message kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    #[default]
    Text,
    /// Merchant-submitted creative material (carries [`AssetMetadata`])
    AssetSubmission,
    /// System request for the merchant to fill the asset form
    FormRequest,
}

/// Structured payload attached to asset submissions
///
/// The asset itself lives in external storage; only the opaque reference
/// is kept here, never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AssetMetadata {
    pub store_name: String,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_copy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    /// Opaque storage reference (URL or key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_ref: Option<String>,
}

/// Entry in an order's communication thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Message unique id
    pub id: String,
    /// Order this message belongs to
    pub order_id: String,
    /// Per-order sequence number - the AUTHORITATIVE ordering for the
    /// thread. Assigned by the store at append time; readers see messages
    /// in sequence order, never wall-clock order.
    pub sequence: u64,
    pub sender: MessageSender,
    pub kind: MessageKind,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AssetMetadata>,
    /// Creation timestamp (Unix milliseconds) - audit only, may lag the
    /// sequence under clock skew
    pub created_at: i64,
}

impl Message {
    /// Create a message awaiting sequence assignment by the store
    pub fn new(
        order_id: impl Into<String>,
        sender: MessageSender,
        kind: MessageKind,
        body: impl Into<String>,
        metadata: Option<AssetMetadata>,
    ) -> Self {
        Self {
            id: new_id(),
            order_id: order_id.into(),
            sequence: 0,
            sender,
            kind,
            body: body.into(),
            metadata,
            created_at: now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_has_no_sequence_yet() {
        let msg = Message::new("ord-1", MessageSender::System, MessageKind::Text, "hi", None);
        assert_eq!(msg.sequence, 0);
        assert!(!msg.id.is_empty());
        assert_eq!(msg.order_id, "ord-1");
    }

    #[test]
    fn test_metadata_skipped_on_wire_when_absent() {
        let msg = Message::new("ord-1", MessageSender::Merchant, MessageKind::Text, "hi", None);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("metadata"));
    }
}
