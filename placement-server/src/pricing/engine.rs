//! Quote engine
//!
//! Pure function computing the placement price for a scope, neighborhood
//! count, and duration tier.

use super::money::{round_minor, to_decimal};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::CoreError;
use shared::models::{DurationTier, PlacementScope, PriceQuote};

/// Multiplier step per additional neighborhood (10%)
const NEIGHBORHOOD_STEP: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Multiplier ceiling - bulk buys get cheaper per neighborhood, capped
const MULTIPLIER_CAP: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Fixed discount on the full three-month price (25%)
const PROMO_DISCOUNT: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Months covered by the promo tier
const PROMO_MONTHS: i64 = 3;

/// Pricing knobs, minor currency units
///
/// Defaults match the published rate card; every value can be overridden
/// through the environment (see `core::Config`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Base monthly price per home-feed placement
    pub home_base: i64,
    /// Base monthly price per category-page placement
    pub category_base: i64,
    /// Flat fee for the professional design service
    pub design_service_fee: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            home_base: 3000,
            category_base: 2500,
            design_service_fee: 5000,
        }
    }
}

impl PricingConfig {
    /// Base monthly price for a scope; `All` buys both surfaces
    pub fn base_monthly(&self, scope: PlacementScope) -> i64 {
        match scope {
            PlacementScope::Home => self.home_base,
            PlacementScope::Category => self.category_base,
            PlacementScope::All => self.home_base + self.category_base,
        }
    }
}

/// Neighborhood bulk multiplier: `1 + 0.10 * (n - 1)`, capped at 2.0
fn neighborhood_multiplier(count: u32) -> Decimal {
    let raw = Decimal::ONE + NEIGHBORHOOD_STEP * Decimal::from(count - 1);
    raw.min(MULTIPLIER_CAP)
}

/// Compute the price quote for a placement configuration
///
/// Errors with `InvalidConfig` when no neighborhood is targeted. Each
/// derived monetary figure is rounded to minor units independently.
pub fn quote(
    config: &PricingConfig,
    scope: PlacementScope,
    neighborhood_count: u32,
    duration_tier: DurationTier,
) -> Result<PriceQuote, CoreError> {
    if neighborhood_count == 0 {
        return Err(CoreError::invalid_config(
            "neighborhoods",
            "at least one neighborhood is required",
        ));
    }

    let base_monthly = config.base_monthly(scope);
    let multiplier = neighborhood_multiplier(neighborhood_count);
    let monthly_total = round_minor(to_decimal(base_monthly) * multiplier);

    let mut quote = PriceQuote {
        scope,
        neighborhood_count,
        duration_tier,
        base_monthly,
        multiplier: multiplier.to_f64().unwrap_or(1.0),
        monthly_total,
        total: monthly_total,
        full_price: None,
        savings: None,
        savings_percent: None,
        monthly_equivalent: None,
    };

    if duration_tier == DurationTier::ThreeMonthPromo {
        // Full price is exact in minor units; only the discounted figures
        // need rounding, and each is rounded on its own.
        let full_price = monthly_total * PROMO_MONTHS;
        let promo_total = round_minor(to_decimal(full_price) * (Decimal::ONE - PROMO_DISCOUNT));
        let savings = full_price - promo_total;
        let monthly_equivalent = round_minor(to_decimal(promo_total) / Decimal::from(PROMO_MONTHS));

        quote.total = promo_total;
        quote.full_price = Some(full_price);
        quote.savings = Some(savings);
        quote.savings_percent = (PROMO_DISCOUNT * Decimal::ONE_HUNDRED).to_f64();
        quote.monthly_equivalent = Some(monthly_equivalent);
    }

    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_card() -> PricingConfig {
        PricingConfig::default()
    }

    #[test]
    fn test_zero_neighborhoods_rejected() {
        let err = quote(
            &rate_card(),
            PlacementScope::Home,
            0,
            DurationTier::OneMonth,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidConfig {
                field: "neighborhoods",
                ..
            }
        ));
    }

    #[test]
    fn test_home_three_neighborhoods_one_month() {
        // multiplier 1.20, base 3000 -> 3600
        let q = quote(
            &rate_card(),
            PlacementScope::Home,
            3,
            DurationTier::OneMonth,
        )
        .unwrap();
        assert_eq!(q.multiplier, 1.2);
        assert_eq!(q.monthly_total, 3600);
        assert_eq!(q.total, 3600);
        assert!(q.full_price.is_none());
        assert!(q.savings.is_none());
    }

    #[test]
    fn test_promo_is_75_percent_of_three_months() {
        // full 3600 * 3 = 10800, promo 8100, savings 2700 (25%)
        let q = quote(
            &rate_card(),
            PlacementScope::Home,
            3,
            DurationTier::ThreeMonthPromo,
        )
        .unwrap();
        assert_eq!(q.full_price, Some(10800));
        assert_eq!(q.total, 8100);
        assert_eq!(q.savings, Some(2700));
        assert_eq!(q.savings_percent, Some(25.0));
        assert_eq!(q.monthly_equivalent, Some(2700));
    }

    #[test]
    fn test_all_scope_sums_both_bases() {
        let q = quote(&rate_card(), PlacementScope::All, 1, DurationTier::OneMonth).unwrap();
        assert_eq!(q.base_monthly, 5500);
        assert_eq!(q.total, 5500);
    }

    #[test]
    fn test_multiplier_caps_at_two() {
        // n = 15 -> raw 2.4, capped to exactly 2.0
        let q = quote(
            &rate_card(),
            PlacementScope::Category,
            15,
            DurationTier::OneMonth,
        )
        .unwrap();
        assert_eq!(q.multiplier, 2.0);
        assert_eq!(q.total, 5000);
    }

    #[test]
    fn test_multiplier_just_below_cap_is_not_clamped() {
        // n = 11 -> exactly 2.0; n = 10 -> 1.9
        let q = quote(
            &rate_card(),
            PlacementScope::Category,
            10,
            DurationTier::OneMonth,
        )
        .unwrap();
        assert_eq!(q.multiplier, 1.9);
        assert_eq!(q.total, 4750);
    }

    #[test]
    fn test_quote_is_deterministic() {
        let a = quote(
            &rate_card(),
            PlacementScope::All,
            7,
            DurationTier::ThreeMonthPromo,
        )
        .unwrap();
        let b = quote(
            &rate_card(),
            PlacementScope::All,
            7,
            DurationTier::ThreeMonthPromo,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rounding_where_naive_float_math_diverges() {
        // 155 * 1.7 is exactly 263.5 -> 264 half-up. The same product in
        // f64 lands just below the midpoint and would round to 263.
        let config = PricingConfig {
            home_base: 155,
            ..rate_card()
        };
        let naive = (155.0_f64 * 1.7_f64).round();
        assert_eq!(naive, 263.0);

        let q = quote(&config, PlacementScope::Home, 8, DurationTier::OneMonth).unwrap();
        assert_eq!(q.total, 264);
    }

    #[test]
    fn test_each_promo_figure_rounds_independently() {
        // base 101, n = 2 -> monthly 111.1 -> 111; full 333; promo 249.75 -> 250;
        // savings from rounded figures 333 - 250 = 83; monthly equivalent
        // 250 / 3 = 83.33 -> 83
        let config = PricingConfig {
            home_base: 101,
            ..rate_card()
        };
        let q = quote(
            &config,
            PlacementScope::Home,
            2,
            DurationTier::ThreeMonthPromo,
        )
        .unwrap();
        assert_eq!(q.monthly_total, 111);
        assert_eq!(q.full_price, Some(333));
        assert_eq!(q.total, 250);
        assert_eq!(q.savings, Some(83));
        assert_eq!(q.monthly_equivalent, Some(83));
    }
}
