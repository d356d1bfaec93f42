//! Placement configuration and derived price quotes

use serde::{Deserialize, Serialize};

/// Where the sponsored ad renders in the host app
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementScope {
    /// Home feed only
    Home,
    /// Category pages only
    Category,
    /// Home feed and category pages
    All,
}

impl std::fmt::Display for PlacementScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementScope::Home => write!(f, "HOME"),
            PlacementScope::Category => write!(f, "CATEGORY"),
            PlacementScope::All => write!(f, "ALL"),
        }
    }
}

/// Contracted duration tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationTier {
    OneMonth,
    /// Three months with a fixed 25% discount on the full price
    ThreeMonthPromo,
}

impl std::fmt::Display for DurationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationTier::OneMonth => write!(f, "ONE_MONTH"),
            DurationTier::ThreeMonthPromo => write!(f, "THREE_MONTH_PROMO"),
        }
    }
}

/// Placement configuration chosen by the advertiser before payment
///
/// Immutable once an order is created; the derived quote is snapshotted
/// into the order at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacementConfig {
    pub scope: PlacementScope,
    /// Neighborhood identifiers the ad is visible in (non-empty)
    pub neighborhoods: Vec<String>,
    pub duration_tier: DurationTier,
}

impl PlacementConfig {
    /// Number of distinct neighborhoods targeted
    pub fn neighborhood_count(&self) -> u32 {
        let unique: std::collections::HashSet<&str> =
            self.neighborhoods.iter().map(String::as_str).collect();
        unique.len() as u32
    }
}

/// Derived price for a placement configuration
///
/// All monetary values are integer minor currency units. Each derived
/// figure is rounded independently so totals never drift with the
/// rounding of intermediate sums. Promo-only fields are `None` for the
/// one-month tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceQuote {
    pub scope: PlacementScope,
    pub neighborhood_count: u32,
    pub duration_tier: DurationTier,
    /// Base monthly price for the scope, before the neighborhood multiplier
    pub base_monthly: i64,
    /// Applied neighborhood multiplier (1.0 ..= 2.0)
    pub multiplier: f64,
    /// Monthly price after the multiplier
    pub monthly_total: i64,
    /// Amount due for the chosen tier
    pub total: i64,
    /// Undiscounted three-month price (promo tier only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_price: Option<i64>,
    /// Absolute savings against the full price (promo tier only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<i64>,
    /// Savings as a percentage of the full price (promo tier only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<f64>,
    /// Effective price per month under the promo (promo tier only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_equivalent: Option<i64>,
}
