//! Placement Server - sponsored placement orders for the marketplace
//!
//! # Architecture
//!
//! - **pricing** (`pricing`): pure quote engine for placement prices
//! - **orders** (`orders`): concurrent order store and the lifecycle
//!   state machine with automated messaging side effects
//! - **messaging** (`messaging`): per-order chat threads
//! - **payment** (`payment`): gateway seam with bounded-timeout calls
//! - **HTTP API** (`api`): RESTful surface for the presentation layer
//!
//! # Module Structure
//!
//! ```text
//! placement-server/src/
//! ├── core/          # configuration, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── pricing/       # quote engine and money helpers
//! ├── orders/        # store + lifecycle manager
//! ├── messaging/     # order thread messaging
//! ├── payment/       # gateway adapter
//! └── utils/         # logging, error mapping
//! ```

pub mod api;
pub mod core;
pub mod messaging;
pub mod orders;
pub mod payment;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use messaging::MessagingService;
pub use orders::{CreateOrderInput, OrderStore, OrdersManager};
pub use payment::{ChargeOutcome, MockGateway, PaymentAdapter, charge_with_timeout};
pub use pricing::PricingConfig;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging from the environment
pub fn setup_environment() {
    let _ = dotenv::dotenv();
    let level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), log_dir.as_deref());
}
