//! Order thread messaging
//!
//! Chat-style messages appended to an order's thread by merchants, the
//! support team, and the system itself (lifecycle side effects).

mod service;

pub use service::{MessagingService, validate_asset_metadata};
