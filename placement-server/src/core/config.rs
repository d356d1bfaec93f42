//! Server configuration
//!
//! All knobs can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | (unset) | directory for rolling file logs |
//! | PAYMENT_TIMEOUT_MS | 10000 | deadline for payment gateway calls |
//! | PRICING_HOME_BASE | 3000 | home-feed base monthly price, minor units |
//! | PRICING_CATEGORY_BASE | 2500 | category-page base monthly price |
//! | PRICING_DESIGN_FEE | 5000 | professional design service fee |

use crate::pricing::PricingConfig;
use std::time::Duration;

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional directory for rolling file logs
    pub log_dir: Option<String>,
    /// Deadline for payment gateway calls, milliseconds
    pub payment_timeout_ms: u64,
    /// Rate card for placement pricing
    pub pricing: PricingConfig,
}

impl Config {
    /// Load configuration from the environment, with defaults
    pub fn from_env() -> Self {
        let defaults = PricingConfig::default();
        Self {
            http_port: env_parse("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            payment_timeout_ms: env_parse("PAYMENT_TIMEOUT_MS", 10_000),
            pricing: PricingConfig {
                home_base: env_parse("PRICING_HOME_BASE", defaults.home_base),
                category_base: env_parse("PRICING_CATEGORY_BASE", defaults.category_base),
                design_service_fee: env_parse("PRICING_DESIGN_FEE", defaults.design_service_fee),
            },
        }
    }

    /// Override the port (test scenarios)
    pub fn with_port(http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config
    }

    /// Payment gateway call deadline
    pub fn payment_timeout(&self) -> Duration {
        Duration::from_millis(self.payment_timeout_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
