//! Miscellaneous helper utilities.

use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use tracing_subscriber::{EnvFilter, fmt};

use crate::errors::{CurveError, Result};

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Divide, rejecting a zero denominator instead of panicking.
pub(crate) fn checked_div(
    numerator: BigDecimal,
    denominator: &BigDecimal,
    what: &str,
) -> Result<BigDecimal> {
    if denominator.is_zero() {
        return Err(CurveError::InvalidCurveParameters(format!("{what} is zero")));
    }
    Ok(numerator / denominator.clone())
}

/// Truncate a decimal price toward zero into base units.
pub(crate) fn decimal_to_price(value: &BigDecimal) -> Result<u64> {
    if *value < BigDecimal::zero() {
        return Err(CurveError::NegativeResultingPrice(value.to_string()));
    }
    value
        .with_scale(0)
        .to_u64()
        .ok_or_else(|| CurveError::PriceOverflow(value.to_string()))
}

/// Narrow an exact integer price into base units.
pub(crate) fn i128_to_price(value: i128) -> Result<u64> {
    if value < 0 {
        return Err(CurveError::NegativeResultingPrice(value.to_string()));
    }
    u64::try_from(value).map_err(|_| CurveError::PriceOverflow(value.to_string()))
}

pub(crate) fn biguint_to_price(value: &BigUint) -> Result<u64> {
    value
        .to_u64()
        .ok_or_else(|| CurveError::PriceOverflow(format!("{}-bit value", value.bits())))
}
