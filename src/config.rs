//! Configuration loader for the quote binary.

use std::str::FromStr;

use crate::curve::PricingSnapshot;
use crate::errors::{CurveError, Result};
use crate::models::{CurveType, OrderDirection};

/// Consolidated quote configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteConfig {
    /// Pair pricing state to quote against.
    pub snapshot: PricingSnapshot,
    pub direction: OrderDirection,
    /// Number of consecutive orders.
    pub orders: usize,
    /// Slippage tolerance in basis points.
    pub slippage_bps: u64,
    /// Treat `BASE_SPOT_PRICE` as the observed current xyk price and derive
    /// the base price first.
    pub derive_from_current: bool,
}

impl QuoteConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; `load` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_price = required(&lookup, "BASE_SPOT_PRICE")?;
        let step = required(&lookup, "DELTA")?;
        let curve: CurveType = required(&lookup, "CURVE")?;
        let counter = optional(&lookup, "MATH_COUNTER")?.unwrap_or(0);
        let direction = optional(&lookup, "ORDER")?.unwrap_or(OrderDirection::Buy);
        let orders = optional(&lookup, "ORDERS")?.unwrap_or(1);
        let slippage_bps = optional(&lookup, "SLIPPAGE_BPS")?.unwrap_or(0);
        let derive_from_current = lookup("DERIVE_FROM_CURRENT")
            .map(|v| v.trim() == "1")
            .unwrap_or(false);

        Ok(Self {
            snapshot: PricingSnapshot::new(base_price, step, curve, counter),
            direction,
            orders,
            slippage_bps,
            derive_from_current,
        })
    }
}

fn optional<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| CurveError::Config(format!("{key}={raw}: {e}")))
        })
        .transpose()
}

fn required<F, T>(lookup: &F, key: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(lookup, key)?.ok_or_else(|| CurveError::Config(format!("Set {key} env var")))
}
