//! OrdersManager - the order lifecycle state machine
//!
//! All order mutations go through this manager. It validates transitions
//! against the current state, commits them atomically through the store,
//! and fires the automated System messages that belong to each transition.
//!
//! # Transition Flow
//!
//! ```text
//! request
//!     ├─ 1. Validate input (metadata, reason, charge outcome)
//!     ├─ 2. OrderStore::update - check edge, mutate, win/lose message flag
//!     ├─ 3. Append messages (winner of the flag only)
//!     └─ 4. Return the committed order
//! ```
//!
//! Automated messages are guarded by `AutoMessageFlags`: the flag is won
//! inside the atomic update, so a retried creation or a pair of racing
//! submissions produces each System message at most once.

use crate::messaging::{MessagingService, validate_asset_metadata};
use crate::payment::ChargeOutcome;
use crate::pricing::{self, PricingConfig};
use shared::models::{
    AssetMetadata, Message, MessageKind, MessageSender, OnboardingStage, Order, OrderKind,
    PaymentMethod, PlacementConfig, PriceQuote, ProductionStatus,
};
use shared::util::now_millis;
use shared::{CoreError, CoreResult};
use std::sync::Arc;

use super::store::OrderStore;

/// System message sent when payment is confirmed and the order enters review
const WELCOME_BODY: &str =
    "Payment confirmed! Your sponsored placement order is now under review.";

/// System message asking design-service merchants for their creative brief
const FORM_REQUEST_BODY: &str = "To get your campaign into production, please send your creative \
     brief: store name, headline, ad copy and call-to-action.";

/// System acknowledgment after the merchant submits assets
const ASSETS_RECEIVED_BODY: &str =
    "We received your creative material. Our design team is on it and will update your order soon.";

/// System thank-you sent at finalization
const THANKS_BODY: &str = "Your campaign is live! Thank you for advertising with us.";

/// Input for creating an order (everything chosen at checkout)
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub merchant_id: String,
    pub placement: PlacementConfig,
    pub kind: OrderKind,
    pub payment_method: PaymentMethod,
}

/// Lifecycle manager for sponsored placement orders
#[derive(Clone)]
pub struct OrdersManager {
    store: Arc<OrderStore>,
    messaging: MessagingService,
    pricing: PricingConfig,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("pricing", &self.pricing)
            .finish()
    }
}

/// Retry an operation once after a lost lock race
///
/// `ConcurrencyConflict` is the only error class retried transparently;
/// every transition error is terminal for the request.
fn with_conflict_retry<T>(op: &'static str, mut f: impl FnMut() -> CoreResult<T>) -> CoreResult<T> {
    match f() {
        Err(CoreError::ConcurrencyConflict { order_id }) => {
            tracing::warn!(op, order_id = %order_id, "Lock contention, retrying once");
            f()
        }
        other => other,
    }
}

impl OrdersManager {
    pub fn new(store: Arc<OrderStore>, messaging: MessagingService, pricing: PricingConfig) -> Self {
        Self {
            store,
            messaging,
            pricing,
        }
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    // ========== Pricing ==========

    /// Price quote for raw configuration values
    pub fn quote(
        &self,
        scope: shared::models::PlacementScope,
        neighborhood_count: u32,
        duration_tier: shared::models::DurationTier,
    ) -> CoreResult<PriceQuote> {
        pricing::quote(&self.pricing, scope, neighborhood_count, duration_tier)
    }

    /// Price quote for a full placement configuration
    pub fn quote_for(&self, placement: &PlacementConfig) -> CoreResult<PriceQuote> {
        self.quote(
            placement.scope,
            placement.neighborhood_count(),
            placement.duration_tier,
        )
    }

    /// Amount due for an order: quote total plus the design fee if a
    /// professional design service was purchased
    pub fn order_total(&self, kind: OrderKind, quote: &PriceQuote) -> i64 {
        match kind {
            OrderKind::StandardPlacement => quote.total,
            OrderKind::ProfessionalDesignService => quote.total + self.pricing.design_service_fee,
        }
    }

    // ========== Transitions ==========

    /// Create an order from a confirmed charge
    ///
    /// Orders are never created unpaid: anything but a `Paid` outcome is
    /// `PaymentNotConfirmed`. The quote is recomputed here and snapshotted
    /// into the order so later rate-card changes never reprice it.
    pub fn create_order(
        &self,
        input: CreateOrderInput,
        charge: &ChargeOutcome,
    ) -> CoreResult<Order> {
        if !charge.is_paid() {
            tracing::warn!(
                merchant_id = %input.merchant_id,
                status = ?charge.status,
                "Rejected order creation without confirmed payment"
            );
            return Err(CoreError::PaymentNotConfirmed);
        }

        let quote = self.quote_for(&input.placement)?;
        let total_amount = self.order_total(input.kind, &quote);

        let order_id = with_conflict_retry("create_order", || {
            let order = Order::new_paid(
                input.merchant_id.clone(),
                input.kind,
                input.placement.clone(),
                quote.clone(),
                total_amount,
                input.payment_method,
                charge.reference.clone(),
            );
            self.store.create(order)
        })?;

        tracing::info!(
            order_id = %order_id,
            merchant_id = %input.merchant_id,
            kind = ?input.kind,
            total_amount,
            "Order created after confirmed payment"
        );

        self.ensure_welcome_messages(&order_id)?;
        self.store.get(&order_id)
    }

    /// Fire the creation-time System messages, exactly once
    ///
    /// Safe to call again on retry: each message is guarded by its flag,
    /// won inside the atomic update; losers skip the send.
    pub fn ensure_welcome_messages(&self, order_id: &str) -> CoreResult<()> {
        let send_welcome = with_conflict_retry("welcome_flag", || {
            self.store.update(order_id, |order| {
                if order.auto_message_flags.welcome_sent {
                    Ok(false)
                } else {
                    order.auto_message_flags.welcome_sent = true;
                    Ok(true)
                }
            })
        })?;
        if send_welcome {
            self.messaging
                .post_system(order_id, WELCOME_BODY, MessageKind::Text)?;
        } else {
            tracing::debug!(order_id = %order_id, "Welcome already sent, skipping");
        }

        let send_request = with_conflict_retry("request_flag", || {
            self.store.update(order_id, |order| {
                if order.kind != OrderKind::ProfessionalDesignService
                    || order.auto_message_flags.request_sent
                {
                    Ok(false)
                } else {
                    order.auto_message_flags.request_sent = true;
                    Ok(true)
                }
            })
        })?;
        if send_request {
            self.messaging
                .post_system(order_id, FORM_REQUEST_BODY, MessageKind::FormRequest)?;
        }

        Ok(())
    }

    /// Merchant submits creative assets (design-service orders only)
    ///
    /// Single-shot: the onboarding stage is a one-way gate, so a second
    /// submission fails with `InvalidTransition`. The acknowledgment is
    /// sent by whichever caller wins the flag; a concurrent loser skips it.
    pub fn submit_assets(
        &self,
        order_id: &str,
        metadata: AssetMetadata,
        note: Option<String>,
    ) -> CoreResult<Order> {
        // Reject malformed metadata before touching any state.
        validate_asset_metadata(&metadata)?;

        let ack_won = with_conflict_retry("submit_assets", || {
            self.store.update(order_id, |order| {
                match order.onboarding_stage {
                    Some(OnboardingStage::AwaitingAssets) => {}
                    Some(stage) => {
                        return Err(CoreError::invalid_transition(
                            stage,
                            OnboardingStage::AssetsReceived,
                        ));
                    }
                    None => {
                        return Err(CoreError::invalid_transition(
                            "NO_ONBOARDING",
                            OnboardingStage::AssetsReceived,
                        ));
                    }
                }
                order.onboarding_stage = Some(OnboardingStage::AssetsReceived);
                order.assets_submitted_at = Some(now_millis());
                let ack_won = !order.auto_message_flags.assets_received_sent;
                order.auto_message_flags.assets_received_sent = true;
                Ok(ack_won)
            })
        })?;

        let body = note.unwrap_or_else(|| "Creative material submitted".to_string());
        self.messaging.post(
            order_id,
            MessageSender::Merchant,
            body,
            MessageKind::AssetSubmission,
            Some(metadata),
        )?;

        if ack_won {
            self.messaging
                .post_system(order_id, ASSETS_RECEIVED_BODY, MessageKind::Text)?;
        }

        tracing::info!(order_id = %order_id, "Assets submitted, onboarding complete");
        self.store.get(order_id)
    }

    /// Support moves production status exactly one step forward
    ///
    /// The requested state must be the current state's single successor;
    /// skips and backward moves fail with `InvalidTransition` carrying
    /// both states.
    pub fn advance_status(
        &self,
        order_id: &str,
        requested: ProductionStatus,
    ) -> CoreResult<Order> {
        with_conflict_retry("advance_status", || {
            self.store.update(order_id, |order| match order.status.next() {
                Some(next) if next == requested => {
                    order.status = next;
                    Ok(())
                }
                _ => Err(CoreError::invalid_transition(order.status, requested)),
            })
        })?;

        tracing::info!(order_id = %order_id, status = %requested, "Production status advanced");
        self.store.get(order_id)
    }

    /// Support finalizes the order with a thank-you
    ///
    /// Allowed only from `Approved` or `Published` while the thank-you has
    /// not been sent; finalization implies publication.
    pub fn finalize_with_thanks(&self, order_id: &str) -> CoreResult<Order> {
        with_conflict_retry("finalize", || {
            self.store.update(order_id, |order| {
                if !matches!(
                    order.status,
                    ProductionStatus::Approved | ProductionStatus::Published
                ) || order.auto_message_flags.thanks_sent
                {
                    return Err(CoreError::invalid_transition(
                        order.status,
                        ProductionStatus::Published,
                    ));
                }
                order.auto_message_flags.thanks_sent = true;
                order.status = ProductionStatus::Published;
                Ok(())
            })
        })?;

        self.messaging
            .post_system(order_id, THANKS_BODY, MessageKind::Text)?;
        tracing::info!(order_id = %order_id, "Order finalized and published");
        self.store.get(order_id)
    }

    /// Stamp the merchant's last view of the order
    ///
    /// Feeds unread-badge computation elsewhere; touches nothing in the
    /// lifecycle.
    pub fn acknowledge_view(&self, order_id: &str) -> CoreResult<Order> {
        with_conflict_retry("acknowledge_view", || {
            self.store.update(order_id, |order| {
                order.last_viewed_at = Some(now_millis());
                Ok(())
            })
        })?;
        self.store.get(order_id)
    }

    /// Administrative escape hatch: move status off the guarded path
    ///
    /// Not part of the guaranteed machine. Demands a reason and logs the
    /// move at WARN so every off-path change leaves a trace.
    pub fn override_status(
        &self,
        order_id: &str,
        status: ProductionStatus,
        reason: &str,
    ) -> CoreResult<Order> {
        if reason.trim().is_empty() {
            return Err(CoreError::invalid_payload("reason"));
        }

        let previous = with_conflict_retry("override_status", || {
            self.store.update(order_id, |order| {
                let previous = order.status;
                order.status = status;
                Ok(previous)
            })
        })?;

        tracing::warn!(
            order_id = %order_id,
            from = %previous,
            to = %status,
            reason,
            "Support override moved order outside the guarded lifecycle"
        );
        self.store.get(order_id)
    }

    // ========== Queries ==========

    pub fn get_order(&self, order_id: &str) -> CoreResult<Order> {
        self.store.get(order_id)
    }

    pub fn list_orders(&self, merchant_id: &str) -> Vec<Order> {
        self.store.list_by_merchant(merchant_id)
    }

    pub fn thread(&self, order_id: &str) -> CoreResult<Vec<Message>> {
        self.messaging.thread(order_id)
    }
}
