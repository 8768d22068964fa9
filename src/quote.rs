//! Slippage bounds for trade instructions.
//!
//! A buy instruction carries `maxAmountToPay`, a sell instruction
//! `minAmountToGet`. Both are derived from the price array total, widened by
//! the trader's tolerance.

use serde::{Deserialize, Serialize};

use crate::curve::{BASE_POINTS, PricingSnapshot, build_price_array};
use crate::errors::{CurveError, Result};
use crate::models::{OrderDirection, PriceArray};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlippageBound {
    MaxAmountToPay(u64),
    MinAmountToGet(u64),
}

impl SlippageBound {
    /// Bound for a ladder `total`, rounded against the trader:
    /// up for buys, down for sells.
    pub fn from_total(direction: OrderDirection, total: u64, tolerance_bps: u64) -> Result<Self> {
        if tolerance_bps > BASE_POINTS {
            return Err(CurveError::InvalidSlippage(tolerance_bps));
        }
        let total = u128::from(total);
        let base_points = u128::from(BASE_POINTS);

        match direction {
            OrderDirection::Buy => {
                let widened = total * (base_points + u128::from(tolerance_bps));
                let amount = widened.div_ceil(base_points);
                u64::try_from(amount)
                    .map(Self::MaxAmountToPay)
                    .map_err(|_| CurveError::PriceOverflow(format!("max amount to pay {amount}")))
            }
            OrderDirection::Sell => {
                let narrowed = total * (base_points - u128::from(tolerance_bps)) / base_points;
                // narrowed <= total, which came from a u64
                Ok(Self::MinAmountToGet(narrowed as u64))
            }
        }
    }

    pub fn amount(&self) -> u64 {
        match *self {
            Self::MaxAmountToPay(amount) | Self::MinAmountToGet(amount) => amount,
        }
    }
}

/// Price ladder and the bound to submit with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub direction: OrderDirection,
    pub count: usize,
    pub prices: PriceArray,
    pub bound: SlippageBound,
}

/// Quote `count` consecutive orders against `snapshot`.
pub fn quote_orders(
    direction: OrderDirection,
    snapshot: &PricingSnapshot,
    count: usize,
    tolerance_bps: u64,
) -> Result<Quote> {
    let prices = build_price_array(direction, snapshot, count)?;
    let bound = SlippageBound::from_total(direction, prices.total, tolerance_bps)?;
    tracing::debug!(%direction, count, total = prices.total, ?bound, "quote built");
    Ok(Quote {
        direction,
        count,
        prices,
        bound,
    })
}
