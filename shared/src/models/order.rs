//! The durable order entity and its lifecycle enums

use super::placement::{PlacementConfig, PriceQuote};
use crate::util::{new_id, now_millis};
use serde::{Deserialize, Serialize};

/// What the advertiser purchased
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    /// Placement only; the merchant supplies finished creatives out of band
    #[default]
    StandardPlacement,
    /// Placement plus a human design service (adds the design fee and the
    /// asset onboarding stage)
    ProfessionalDesignService,
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Pix,
    Credit,
    Debit,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Pix => write!(f, "PIX"),
            PaymentMethod::Credit => write!(f, "CREDIT"),
            PaymentMethod::Debit => write!(f, "DEBIT"),
        }
    }
}

/// Outcome reported by the payment gateway
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// Production lifecycle - independent of payment status
///
/// Strictly forward: UnderReview -> InProduction -> Approved -> Published.
/// Merchants never see a backward edge; only the logged support override
/// moves an order off this path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductionStatus {
    UnderReview,
    InProduction,
    Approved,
    Published,
}

impl ProductionStatus {
    /// The single allowed next state, or `None` when terminal
    pub fn next(self) -> Option<Self> {
        match self {
            ProductionStatus::UnderReview => Some(ProductionStatus::InProduction),
            ProductionStatus::InProduction => Some(ProductionStatus::Approved),
            ProductionStatus::Approved => Some(ProductionStatus::Published),
            ProductionStatus::Published => None,
        }
    }
}

impl std::fmt::Display for ProductionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductionStatus::UnderReview => write!(f, "UNDER_REVIEW"),
            ProductionStatus::InProduction => write!(f, "IN_PRODUCTION"),
            ProductionStatus::Approved => write!(f, "APPROVED"),
            ProductionStatus::Published => write!(f, "PUBLISHED"),
        }
    }
}

/// Asset onboarding sub-lifecycle, one-way gate
///
/// Only meaningful for design-service orders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnboardingStage {
    AwaitingAssets,
    AssetsReceived,
}

impl std::fmt::Display for OnboardingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnboardingStage::AwaitingAssets => write!(f, "AWAITING_ASSETS"),
            OnboardingStage::AssetsReceived => write!(f, "ASSETS_RECEIVED"),
        }
    }
}

/// Duplicate-suppression flags for automated messages
///
/// Each flag is set exactly once, inside the order's atomic update; the
/// caller that wins the flag sends the message, losers skip it. This is
/// what makes creation retries and concurrent submissions idempotent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AutoMessageFlags {
    /// Payment-confirmation message sent
    pub welcome_sent: bool,
    /// Asset form request sent (design-service orders)
    pub request_sent: bool,
    /// Acknowledgment of received assets sent
    pub assets_received_sent: bool,
    /// Final thank-you sent
    pub thanks_sent: bool,
}

/// A paid sponsored placement order
///
/// Created only after the gateway reports `Paid`; mutated only through the
/// lifecycle manager; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Server-generated unique id
    pub id: String,
    /// Owning advertiser
    pub merchant_id: String,
    pub kind: OrderKind,
    /// Immutable configuration the advertiser paid for
    pub placement: PlacementConfig,
    /// Price quote snapshotted at creation (immune to later rule changes)
    pub quote: PriceQuote,
    /// Amount charged, minor units (quote total + design fee if applicable)
    pub total_amount: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    /// Gateway reference for the successful charge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    pub status: ProductionStatus,
    /// `Some` only for design-service orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_stage: Option<OnboardingStage>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_viewed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_submitted_at: Option<i64>,
    #[serde(default)]
    pub auto_message_flags: AutoMessageFlags,
    /// Bumped on every committed update; used for conflict detection
    #[serde(default)]
    pub version: u64,
}

impl Order {
    /// Build a freshly paid order in its initial lifecycle state
    pub fn new_paid(
        merchant_id: impl Into<String>,
        kind: OrderKind,
        placement: PlacementConfig,
        quote: PriceQuote,
        total_amount: i64,
        payment_method: PaymentMethod,
        payment_reference: Option<String>,
    ) -> Self {
        let onboarding_stage = match kind {
            OrderKind::ProfessionalDesignService => Some(OnboardingStage::AwaitingAssets),
            OrderKind::StandardPlacement => None,
        };
        Self {
            id: new_id(),
            merchant_id: merchant_id.into(),
            kind,
            placement,
            quote,
            total_amount,
            payment_method,
            payment_status: PaymentStatus::Paid,
            payment_reference,
            status: ProductionStatus::UnderReview,
            onboarding_stage,
            created_at: now_millis(),
            last_viewed_at: None,
            assets_submitted_at: None,
            auto_message_flags: AutoMessageFlags::default(),
            version: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DurationTier, PlacementScope};

    fn test_config() -> PlacementConfig {
        PlacementConfig {
            scope: PlacementScope::Home,
            neighborhoods: vec!["centro".into()],
            duration_tier: DurationTier::OneMonth,
        }
    }

    fn test_quote() -> PriceQuote {
        PriceQuote {
            scope: PlacementScope::Home,
            neighborhood_count: 1,
            duration_tier: DurationTier::OneMonth,
            base_monthly: 3000,
            multiplier: 1.0,
            monthly_total: 3000,
            total: 3000,
            full_price: None,
            savings: None,
            savings_percent: None,
            monthly_equivalent: None,
        }
    }

    #[test]
    fn test_status_walk_is_strictly_forward() {
        assert_eq!(
            ProductionStatus::UnderReview.next(),
            Some(ProductionStatus::InProduction)
        );
        assert_eq!(
            ProductionStatus::InProduction.next(),
            Some(ProductionStatus::Approved)
        );
        assert_eq!(
            ProductionStatus::Approved.next(),
            Some(ProductionStatus::Published)
        );
        assert_eq!(ProductionStatus::Published.next(), None);
    }

    #[test]
    fn test_design_service_order_starts_awaiting_assets() {
        let order = Order::new_paid(
            "merchant-1",
            OrderKind::ProfessionalDesignService,
            test_config(),
            test_quote(),
            8000,
            PaymentMethod::Pix,
            Some("pix-ref".into()),
        );
        assert_eq!(order.status, ProductionStatus::UnderReview);
        assert_eq!(order.onboarding_stage, Some(OnboardingStage::AwaitingAssets));
        assert_eq!(order.auto_message_flags, AutoMessageFlags::default());
    }

    #[test]
    fn test_standard_order_has_no_onboarding_stage() {
        let order = Order::new_paid(
            "merchant-1",
            OrderKind::StandardPlacement,
            test_config(),
            test_quote(),
            3000,
            PaymentMethod::Credit,
            None,
        );
        assert_eq!(order.onboarding_stage, None);
    }
}
