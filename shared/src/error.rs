//! Typed error taxonomy for the placement order core
//!
//! Every fallible core operation returns [`CoreError`]. The variants carry
//! enough structured detail (field names, current vs. requested state) for
//! the presentation layer to render a precise message, and each maps to a
//! stable wire [`ErrorCode`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire error codes (frontend is responsible for localization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidConfig,
    InvalidTransition,
    InvalidPayload,
    NotFound,
    PaymentNotConfirmed,
    ConcurrencyConflict,
    ExternalTimeout,
}

/// Core errors
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bad pricing input - the advertiser's configuration is incomplete
    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// State machine violation - terminal for this request, never retried
    #[error("Invalid transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    /// Malformed message or metadata
    #[error("Invalid payload: missing or empty field `{field}`")]
    InvalidPayload { field: &'static str },

    /// Unknown order or message id
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Order creation attempted without a prior successful charge
    #[error("Payment not confirmed")]
    PaymentNotConfirmed,

    /// Lost a per-order serialization race - caller should retry once
    #[error("Concurrent update conflict on order {order_id}")]
    ConcurrencyConflict { order_id: String },

    /// Bounded external call did not answer in time - retryable
    #[error("External call to {service} timed out")]
    ExternalTimeout { service: &'static str },
}

impl CoreError {
    // ========== Convenient constructors ==========

    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_transition(
        current: impl std::fmt::Display,
        requested: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidTransition {
            current: current.to_string(),
            requested: requested.to_string(),
        }
    }

    pub fn invalid_payload(field: &'static str) -> Self {
        Self::InvalidPayload { field }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(order_id: impl Into<String>) -> Self {
        Self::ConcurrencyConflict {
            order_id: order_id.into(),
        }
    }

    // ========== Error inspection ==========

    /// Stable wire code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            Self::InvalidPayload { .. } => ErrorCode::InvalidPayload,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::PaymentNotConfirmed => ErrorCode::PaymentNotConfirmed,
            Self::ConcurrencyConflict { .. } => ErrorCode::ConcurrencyConflict,
            Self::ExternalTimeout { .. } => ErrorCode::ExternalTimeout,
        }
    }

    /// Whether the caller may transparently retry the whole operation once
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConcurrencyConflict { .. } | Self::ExternalTimeout { .. }
        )
    }
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
