//! Bonding-curve pricing engine.
//!
//! Pure functions over a [`PricingSnapshot`]; nothing here performs I/O or
//! keeps state between calls.

pub mod calc;
pub mod series;
pub mod state;

pub use calc::{BASE_POINTS, MAX_EXPONENT, current_price, derive_base_price, next_price};
pub use series::{PriceLadder, build_price_array, sum_of_orders};
pub use state::PricingSnapshot;
