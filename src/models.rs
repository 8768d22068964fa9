//! Shared data structures used throughout the pricing engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CurveError;

/// Bonding curve family of a pair. Fixed at pair creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// `delta` is an absolute price increment per trade.
    Linear,
    /// `delta` is a growth rate in basis points per trade.
    Exponential,
    /// `delta` is a virtual NFT-side reserve ("XYK").
    #[serde(rename = "xyk", alias = "constantProduct")]
    ConstantProduct,
}

impl FromStr for CurveType {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "exponential" => Ok(Self::Exponential),
            "xyk" | "constantproduct" | "constant_product" => Ok(Self::ConstantProduct),
            other => Err(CurveError::UnsupportedCurveType(other.to_string())),
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Exponential => "exponential",
            Self::ConstantProduct => "xyk",
        };
        f.write_str(name)
    }
}

/// Side of the order from the trader's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Trader buys an NFT from the pair: counter moves up.
    Buy,
    /// Trader sells an NFT into the pair: counter moves down.
    Sell,
}

impl OrderDirection {
    /// Signed counter step for one order in this direction.
    pub fn counter_step(self) -> i64 {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
        }
    }
}

impl FromStr for OrderDirection {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(CurveError::UnsupportedOrderDirection(other.to_string())),
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        })
    }
}

/// Ordered prices of `count` consecutive orders plus their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceArray {
    #[serde(rename = "array")]
    pub prices: Vec<u64>,
    pub total: u64,
}

impl PriceArray {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
