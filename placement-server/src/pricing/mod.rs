//! Placement pricing
//!
//! Pure quote computation for ad placements: scope base prices, the
//! neighborhood bulk multiplier, and the three-month promo discount.
//! All monetary arithmetic runs over integer minor units with
//! `rust_decimal`; no I/O, deterministic for identical inputs.

mod engine;
mod money;

pub use engine::{PricingConfig, quote};
pub use money::{round_minor, to_decimal};
