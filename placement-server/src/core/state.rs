//! Shared server state
//!
//! `ServerState` holds Arc-shared handles to every service; cloning is a
//! shallow copy handed to each request handler.

use std::sync::Arc;

use crate::core::Config;
use crate::messaging::MessagingService;
use crate::orders::{OrderStore, OrdersManager};
use crate::payment::{MockGateway, PaymentAdapter};

/// Shared handles for request handlers
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// Order and message store
    pub store: Arc<OrderStore>,
    /// Lifecycle state machine
    pub manager: Arc<OrdersManager>,
    /// Order thread messaging
    pub messaging: MessagingService,
    /// Payment gateway collaborator
    pub payment: Arc<dyn PaymentAdapter>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish()
    }
}

impl ServerState {
    /// Wire up all services with the default payment gateway
    pub fn initialize(config: &Config) -> Self {
        Self::with_payment_adapter(config, Arc::new(MockGateway::new()))
    }

    /// Wire up all services around a specific payment adapter
    pub fn with_payment_adapter(config: &Config, payment: Arc<dyn PaymentAdapter>) -> Self {
        let store = Arc::new(OrderStore::new());
        let messaging = MessagingService::new(store.clone());
        let manager = Arc::new(OrdersManager::new(
            store.clone(),
            messaging.clone(),
            config.pricing,
        ));
        tracing::info!(
            home_base = config.pricing.home_base,
            category_base = config.pricing.category_base,
            design_fee = config.pricing.design_service_fee,
            "Placement services initialized"
        );
        Self {
            config: config.clone(),
            store,
            manager,
            messaging,
            payment,
        }
    }
}
