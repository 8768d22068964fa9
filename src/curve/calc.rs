use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use num_traits::One;

use crate::curve::state::PricingSnapshot;
use crate::errors::{CurveError, Result};
use crate::models::{CurveType, OrderDirection};
use crate::utils::{biguint_to_price, checked_div, decimal_to_price, i128_to_price};

/// Denominator of the exponential curve's basis-point `delta`.
pub const BASE_POINTS: u64 = 10_000;

/// Beyond this exponent `1.0001^n` exceeds `u64::MAX`, so any positive base
/// overflows (growth) or truncates to zero (decay).
pub const MAX_EXPONENT: u64 = 450_000;

/// Price the next order in `direction` would execute at.
///
/// Rounding: Linear is exact; Exponential and ConstantProduct are evaluated
/// exactly (rational / 100-digit decimal) and truncated toward zero once.
pub fn next_price(direction: OrderDirection, snapshot: &PricingSnapshot) -> Result<u64> {
    let price = match snapshot.curve {
        CurveType::Linear => linear_next_price(direction, snapshot),
        CurveType::Exponential => exponential_next_price(direction, snapshot),
        CurveType::ConstantProduct => constant_product_next_price(direction, snapshot),
    };

    match &price {
        Ok(price) => tracing::trace!(
            curve = %snapshot.curve,
            %direction,
            counter = snapshot.counter,
            price,
            "next price"
        ),
        Err(e) => tracing::debug!(
            curve = %snapshot.curve,
            %direction,
            counter = snapshot.counter,
            base_price = snapshot.base_price,
            step = snapshot.step,
            error = %e,
            "next price rejected"
        ),
    }
    price
}

/// Price at the snapshot's own counter: the first rung of a sell ladder.
pub fn current_price(snapshot: &PricingSnapshot) -> Result<u64> {
    next_price(OrderDirection::Sell, &snapshot.shifted(1)?)
}

/// `base + step * target`.
fn linear_next_price(direction: OrderDirection, snapshot: &PricingSnapshot) -> Result<u64> {
    let target = snapshot.shifted(direction.counter_step())?.counter;
    let price = i128::from(snapshot.step)
        .checked_mul(i128::from(target))
        .and_then(|offset| offset.checked_add(i128::from(snapshot.base_price)))
        .ok_or_else(|| {
            CurveError::PriceOverflow(format!(
                "{} + {} * {}",
                snapshot.base_price, snapshot.step, target
            ))
        })?;
    i128_to_price(price)
}

/// `base * ((delta + 10_000) / 10_000) ^ new_counter`, growth and decay kept
/// as separate paths.
fn exponential_next_price(direction: OrderDirection, snapshot: &PricingSnapshot) -> Result<u64> {
    let new_counter = snapshot.shifted(direction.counter_step())?.counter;
    if snapshot.base_price == 0 || snapshot.step == 0 || new_counter == 0 {
        return Ok(snapshot.base_price);
    }

    let exponent = new_counter.unsigned_abs();
    let overflow = || {
        CurveError::PriceOverflow(format!(
            "exponential growth with base {} delta {} at counter {new_counter}",
            snapshot.base_price, snapshot.step
        ))
    };

    // log2 of the result, only used to skip exact arithmetic whose outcome
    // is already decided: > 66 bits always overflows, < -2 always truncates to 0
    let estimated_bits = (snapshot.base_price as f64).log2()
        + new_counter as f64
            * ((snapshot.step as f64 + BASE_POINTS as f64).log2() - (BASE_POINTS as f64).log2());

    let base = BigUint::from(snapshot.base_price);
    let growth = BigUint::from(snapshot.step) + BigUint::from(BASE_POINTS);
    let base_points = BigUint::from(BASE_POINTS);

    if new_counter > 0 {
        if exponent > MAX_EXPONENT || estimated_bits > 66.0 {
            return Err(overflow());
        }
        let exponent = exponent as u32;
        biguint_to_price(&(base * growth.pow(exponent) / base_points.pow(exponent)))
            .map_err(|_| overflow())
    } else {
        if exponent > MAX_EXPONENT || estimated_bits < -2.0 {
            return Ok(0);
        }
        let exponent = exponent as u32;
        biguint_to_price(&(base * base_points.pow(exponent) / growth.pow(exponent)))
    }
}

/// Discrete x*y=k step where `delta` acts as a virtual NFT reserve.
fn constant_product_next_price(
    direction: OrderDirection,
    snapshot: &PricingSnapshot,
) -> Result<u64> {
    let step = BigDecimal::from(snapshot.step);
    let tokens_balance = &step * BigDecimal::from(snapshot.base_price);

    let adjusted_counter = match direction {
        OrderDirection::Buy => snapshot.counter,
        OrderDirection::Sell => snapshot.shifted(-1)?.counter,
    };
    let adjusted_counter = BigDecimal::from(adjusted_counter);

    let current_delta = step + BigDecimal::one() - &adjusted_counter;
    let diff = checked_div(
        &adjusted_counter * &tokens_balance,
        &current_delta,
        "curDelta",
    )?;
    let new_tokens_balance = tokens_balance + diff;

    let divisor = match direction {
        OrderDirection::Buy => &current_delta - BigDecimal::one(),
        OrderDirection::Sell => &current_delta + BigDecimal::one(),
    };
    let price = checked_div(new_tokens_balance, &divisor, "curDelta +/- 1")?;
    decimal_to_price(&price)
}

/// Recover the counter-zero base price of a ConstantProduct curve from its
/// observed current price, so a pair can be re-parameterised without
/// resetting its counter.
pub fn derive_base_price(observed_price: u64, step: u64, counter: i64) -> Result<u64> {
    if step == 0 {
        return Ok(observed_price);
    }

    let corrected = counter
        .checked_sub(1)
        .ok_or(CurveError::CounterOutOfRange(counter))?;
    let step_d = BigDecimal::from(step);
    let corrected = BigDecimal::from(corrected);
    let delta_corrected = &step_d - &corrected;

    let inner = checked_div(
        &corrected * &step_d,
        &(&delta_corrected + BigDecimal::one()),
        "deltaCorrected + 1",
    )?;
    let denominator = step_d + inner;
    let base = checked_div(
        BigDecimal::from(observed_price) * delta_corrected,
        &denominator,
        "base price denominator",
    )?;

    let base = decimal_to_price(&base)?;
    tracing::debug!(observed_price, step, counter, base, "derived xyk base price");
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(base: u64, step: u64, counter: i64) -> PricingSnapshot {
        PricingSnapshot::new(base, step, CurveType::Linear, counter)
    }

    fn exponential(base: u64, step: u64, counter: i64) -> PricingSnapshot {
        PricingSnapshot::new(base, step, CurveType::Exponential, counter)
    }

    fn xyk(base: u64, step: u64, counter: i64) -> PricingSnapshot {
        PricingSnapshot::new(base, step, CurveType::ConstantProduct, counter)
    }

    #[test]
    fn linear_buy_and_sell_from_zero() {
        let s = linear(1_000_000_000, 200_000_000, 0);
        assert_eq!(next_price(OrderDirection::Buy, &s).unwrap(), 1_200_000_000);
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 800_000_000);
    }

    #[test]
    fn linear_uses_counter_offset_from_base() {
        let s = linear(1_000, 10, 7);
        assert_eq!(next_price(OrderDirection::Buy, &s).unwrap(), 1_080);
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 1_060);

        let s = linear(1_000, 10, -7);
        assert_eq!(next_price(OrderDirection::Buy, &s).unwrap(), 940);
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 920);
    }

    #[test]
    fn linear_negative_price_is_an_error() {
        let s = linear(100, 60, -1);
        assert_eq!(
            next_price(OrderDirection::Sell, &s),
            Err(CurveError::NegativeResultingPrice("-20".into()))
        );
    }

    #[test]
    fn linear_overflow_is_an_error() {
        let s = linear(u64::MAX, 1, 0);
        assert!(matches!(
            next_price(OrderDirection::Buy, &s),
            Err(CurveError::PriceOverflow(_))
        ));
    }

    #[test]
    fn exponential_growth_and_decay() {
        // 1000 bps = 10% per order
        let s = exponential(1_000_000_000, 1_000, 0);
        assert_eq!(next_price(OrderDirection::Buy, &s).unwrap(), 1_100_000_000);
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 909_090_909);

        let s = exponential(1_000_000_000, 1_000, 1);
        assert_eq!(next_price(OrderDirection::Buy, &s).unwrap(), 1_210_000_000);
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 1_000_000_000);

        let s = exponential(1_000_000_000, 1_000, -1);
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 826_446_280);
    }

    #[test]
    fn exponential_buy_then_sell_returns_to_base() {
        let base = 1_234_567_891;
        let after_buy = exponential(base, 375, 1);
        assert_eq!(next_price(OrderDirection::Sell, &after_buy).unwrap(), base);
    }

    #[test]
    fn exponential_zero_step_is_flat() {
        let s = exponential(5_000, 0, 42);
        assert_eq!(next_price(OrderDirection::Buy, &s).unwrap(), 5_000);
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 5_000);
    }

    #[test]
    fn exponential_far_counters() {
        let s = exponential(1, 1, MAX_EXPONENT as i64);
        assert!(matches!(
            next_price(OrderDirection::Buy, &s),
            Err(CurveError::PriceOverflow(_))
        ));

        let s = exponential(u64::MAX, 1, -(MAX_EXPONENT as i64));
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 0);
    }

    #[test]
    fn exponential_overflow_reports_inputs_not_value() {
        for s in [
            exponential(1, u64::MAX, 200_000),
            exponential(1_000_000_000, 10_000, 100_000),
            exponential(1_000_000_000, 10_000, 34),
        ] {
            match next_price(OrderDirection::Buy, &s) {
                Err(CurveError::PriceOverflow(msg)) => {
                    assert!(msg.len() < 200, "{} bytes", msg.len());
                    assert!(msg.contains(&format!("delta {}", s.step)), "{msg}");
                }
                other => panic!("expected overflow, got {other:?}"),
            }
        }
    }

    #[test]
    fn exponential_near_u64_limit_is_exact() {
        // 2^63 * 2 = 2^64 overflows, 2^62 * 2 = 2^63 fits
        let s = exponential(1 << 63, 10_000, 0);
        assert!(matches!(
            next_price(OrderDirection::Buy, &s),
            Err(CurveError::PriceOverflow(_))
        ));
        let s = exponential(1 << 62, 10_000, 0);
        assert_eq!(next_price(OrderDirection::Buy, &s).unwrap(), 1 << 63);
        // deep decay with a huge base still truncates exactly
        let s = exponential(u64::MAX, 10_000, -62);
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 1);
    }

    #[test]
    fn xyk_matches_reference_values() {
        let s = xyk(1_000_000_000, 10, 0);
        assert_eq!(next_price(OrderDirection::Buy, &s).unwrap(), 1_000_000_000);
        assert_eq!(next_price(OrderDirection::Sell, &s).unwrap(), 705_128_205);

        let s = xyk(1_000_000_000, 10, 1);
        assert_eq!(next_price(OrderDirection::Buy, &s).unwrap(), 1_222_222_222);
    }

    #[test]
    fn xyk_zero_denominators_are_domain_errors() {
        // curDelta == 0
        let s = xyk(1_000_000_000, 10, 11);
        assert!(matches!(
            next_price(OrderDirection::Buy, &s),
            Err(CurveError::InvalidCurveParameters(_))
        ));
        // curDelta - 1 == 0
        let s = xyk(1_000_000_000, 10, 10);
        assert!(matches!(
            next_price(OrderDirection::Buy, &s),
            Err(CurveError::InvalidCurveParameters(_))
        ));
        // sell: curDelta == 0 at counter - 1 == step + 1
        let s = xyk(1_000_000_000, 10, 12);
        assert!(matches!(
            next_price(OrderDirection::Sell, &s),
            Err(CurveError::InvalidCurveParameters(_))
        ));
    }

    #[test]
    fn current_price_is_base_at_zero_for_linear_and_exponential() {
        assert_eq!(current_price(&linear(777, 5, 0)).unwrap(), 777);
        assert_eq!(current_price(&linear(777, 5, 3)).unwrap(), 792);
        assert_eq!(current_price(&exponential(777, 500, 0)).unwrap(), 777);
    }

    #[test]
    fn derive_with_zero_step_is_identity() {
        assert_eq!(derive_base_price(123_456, 0, 99).unwrap(), 123_456);
    }

    #[test]
    fn derive_inverts_xyk_current_price() {
        let observed = 1_000_000_000;
        let base = derive_base_price(observed, 10, 3).unwrap();
        assert_eq!(base, 654_545_454);

        let back = current_price(&xyk(base, 10, 3)).unwrap();
        assert!(observed.abs_diff(back) <= 10, "{back}");
    }

    #[test]
    fn derive_zero_denominator_is_domain_error() {
        // deltaCorrected == -1 when counter == step + 2
        assert!(matches!(
            derive_base_price(1_000_000_000, 10, 12),
            Err(CurveError::InvalidCurveParameters(_))
        ));
    }
}
