//! Domain models for sponsored placement orders

mod message;
mod order;
mod placement;

pub use message::{AssetMetadata, Message, MessageKind, MessageSender};
pub use order::{
    AutoMessageFlags, OnboardingStage, Order, OrderKind, PaymentMethod, PaymentStatus,
    ProductionStatus,
};
pub use placement::{DurationTier, PlacementConfig, PlacementScope, PriceQuote};
