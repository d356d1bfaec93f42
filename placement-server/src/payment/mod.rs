//! Payment gateway seam
//!
//! The core never talks to a processor directly; it consumes a
//! [`PaymentAdapter`] that answers `charge` with a paid/failed outcome.
//! External calls are bounded: [`charge_with_timeout`] wraps the adapter
//! call and maps an elapsed deadline to the retryable `ExternalTimeout`
//! error, committing nothing.

use async_trait::async_trait;
use shared::models::{PaymentMethod, PaymentStatus};
use shared::util::new_id;
use shared::{CoreError, CoreResult};
use std::time::Duration;

/// Result of a charge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeOutcome {
    /// `Paid` or `Failed`; gateways never answer `Pending`
    pub status: PaymentStatus,
    /// Processor reference for reconciliation
    pub reference: Option<String>,
}

impl ChargeOutcome {
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}

/// External payment processor contract
#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    /// Attempt to charge `amount` minor units via `method`
    async fn charge(&self, amount: i64, method: PaymentMethod) -> CoreResult<ChargeOutcome>;
}

/// Charge with a caller-supplied deadline
///
/// On timeout the order (not yet created) is untouched and the caller
/// surfaces the retryable error.
pub async fn charge_with_timeout(
    adapter: &dyn PaymentAdapter,
    amount: i64,
    method: PaymentMethod,
    deadline: Duration,
) -> CoreResult<ChargeOutcome> {
    match tokio::time::timeout(deadline, adapter.charge(amount, method)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::warn!(amount, method = %method, "Payment charge timed out");
            Err(CoreError::ExternalTimeout { service: "payment" })
        }
    }
}

/// In-process gateway used by the default wiring and the test suite
///
/// Deterministic: answers the configured status after an optional delay.
#[derive(Debug, Clone)]
pub struct MockGateway {
    outcome: PaymentStatus,
    delay: Duration,
}

impl MockGateway {
    /// Gateway that approves every charge
    pub fn new() -> Self {
        Self {
            outcome: PaymentStatus::Paid,
            delay: Duration::ZERO,
        }
    }

    /// Gateway that declines every charge
    pub fn declining() -> Self {
        Self {
            outcome: PaymentStatus::Failed,
            delay: Duration::ZERO,
        }
    }

    /// Add artificial processing latency (timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentAdapter for MockGateway {
    async fn charge(&self, amount: i64, method: PaymentMethod) -> CoreResult<ChargeOutcome> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let reference = match self.outcome {
            PaymentStatus::Paid => Some(new_id()),
            _ => None,
        };
        tracing::debug!(amount, method = %method, status = ?self.outcome, "Mock charge processed");
        Ok(ChargeOutcome {
            status: self.outcome,
            reference,
        })
    }
}
