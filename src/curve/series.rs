//! Multi-order projections along a curve.

use crate::curve::calc::next_price;
use crate::curve::state::PricingSnapshot;
use crate::errors::{CurveError, Result};
use crate::models::{OrderDirection, PriceArray};

/// Iterator over the execution prices of consecutive orders in one direction.
///
/// Buys start at the snapshot's counter, sells one above it, so that the
/// first sell rung is the price after the first unit leaves the pair. Only
/// the counter moves between rungs. Stops after the first error.
#[derive(Debug, Clone)]
pub struct PriceLadder {
    direction: OrderDirection,
    position: PricingSnapshot,
    pending_shift: i64,
    remaining: usize,
}

impl PriceLadder {
    pub fn new(direction: OrderDirection, snapshot: &PricingSnapshot, count: usize) -> Self {
        let pending_shift = match direction {
            OrderDirection::Buy => 0,
            OrderDirection::Sell => 1,
        };
        Self {
            direction,
            position: *snapshot,
            pending_shift,
            remaining: count,
        }
    }
}

impl Iterator for PriceLadder {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let position = match self.position.shifted(self.pending_shift) {
            Ok(position) => position,
            Err(e) => {
                self.remaining = 0;
                return Some(Err(e));
            }
        };
        self.position = position;
        self.pending_shift = self.direction.counter_step();
        self.remaining -= 1;

        let price = next_price(self.direction, &position);
        if price.is_err() {
            self.remaining = 0;
        }
        Some(price)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

fn add_to_total(total: u64, price: u64) -> Result<u64> {
    total
        .checked_add(price)
        .ok_or_else(|| CurveError::PriceOverflow(format!("series total {total} + {price}")))
}

/// Aggregate cost of `count` consecutive orders in `direction`.
///
/// Walks the same ladder as [`build_price_array`] without keeping the rungs,
/// so both always agree. `count == 0` yields 0.
pub fn sum_of_orders(
    direction: OrderDirection,
    snapshot: &PricingSnapshot,
    count: usize,
) -> Result<u64> {
    let total = PriceLadder::new(direction, snapshot, count)
        .try_fold(0u64, |total, price| add_to_total(total, price?))?;
    tracing::debug!(
        curve = %snapshot.curve,
        %direction,
        counter = snapshot.counter,
        count,
        total,
        "sum of orders"
    );
    Ok(total)
}

/// Every execution price of `count` consecutive orders plus their sum.
pub fn build_price_array(
    direction: OrderDirection,
    snapshot: &PricingSnapshot,
    count: usize,
) -> Result<PriceArray> {
    let mut array = PriceArray::default();
    for price in PriceLadder::new(direction, snapshot, count) {
        let price = price?;
        array.total = add_to_total(array.total, price)?;
        array.prices.push(price);
    }
    tracing::debug!(
        curve = %snapshot.curve,
        %direction,
        counter = snapshot.counter,
        count,
        total = array.total,
        "built price array"
    );
    Ok(array)
}
