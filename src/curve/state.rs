use serde::{Deserialize, Serialize};

use crate::errors::{CurveError, Result};
use crate::models::CurveType;

/// Minimal immutable snapshot of a pair's pricing state, as read from the
/// on-chain pair account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    /// Curve price at counter 0 (`baseSpotPrice`), in base units.
    #[serde(rename = "baseSpotPrice")]
    pub base_price: u64,
    /// Curve-specific step (`delta`).
    #[serde(rename = "delta")]
    pub step: u64,
    #[serde(rename = "bondingCurveType")]
    pub curve: CurveType,
    /// Net buys minus net sells since pair creation (`mathCounter`).
    #[serde(rename = "mathCounter")]
    pub counter: i64,
}

impl PricingSnapshot {
    pub fn new(base_price: u64, step: u64, curve: CurveType, counter: i64) -> Self {
        Self {
            base_price,
            step,
            curve,
            counter,
        }
    }

    /// Same curve evaluated at another counter value.
    pub fn with_counter(self, counter: i64) -> Self {
        Self { counter, ..self }
    }

    /// Same curve and counter with a rewritten base price (modify-pair flow).
    pub fn with_base_price(self, base_price: u64) -> Self {
        Self { base_price, ..self }
    }

    /// Counter moved by `offset`, failing instead of wrapping.
    pub fn shifted(self, offset: i64) -> Result<Self> {
        self.counter
            .checked_add(offset)
            .map(|counter| self.with_counter(counter))
            .ok_or(CurveError::CounterOutOfRange(self.counter))
    }
}
