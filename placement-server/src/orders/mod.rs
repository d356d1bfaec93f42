//! Order lifecycle module
//!
//! - **store**: concurrent in-memory store for orders and their message
//!   threads, with per-order update serialization
//! - **manager**: the lifecycle state machine - transition validation and
//!   automated-message side effects
//!
//! # Mutation Flow
//!
//! ```text
//! request -> OrdersManager
//!               ├─ validate transition against current state
//!               ├─ OrderStore::update (per-order lock, version bump)
//!               └─ automated System message (flag-guarded, at most once)
//! ```

pub mod manager;
pub mod store;

pub use manager::{CreateOrderInput, OrdersManager};
pub use store::OrderStore;
