//! Client-side pricing for an NFT bonding-curve AMM.
//!
//! Given a pair's pricing snapshot this crate computes next-order prices,
//! price ladders for multi-order trades, the slippage bounds attached to
//! trade instructions, and the ConstantProduct base-price inverse used when a
//! pair is modified.

pub mod config;
pub mod curve;
pub mod errors;
pub mod models;
pub mod quote;
pub mod utils;

pub use curve::{
    PriceLadder, PricingSnapshot, build_price_array, current_price, derive_base_price,
    next_price, sum_of_orders,
};
pub use errors::{CurveError, Result};
pub use models::{CurveType, OrderDirection, PriceArray};
pub use quote::{Quote, SlippageBound, quote_orders};
