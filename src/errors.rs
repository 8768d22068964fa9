use thiserror::Error;

pub type Result<T> = std::result::Result<T, CurveError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// A curve formula hit a zero denominator for the given inputs.
    #[error("Invalid curve parameters: {0}")]
    InvalidCurveParameters(String),

    #[error("Negative resulting price: {0}")]
    NegativeResultingPrice(String),

    #[error("Unsupported curve type: {0}")]
    UnsupportedCurveType(String),

    #[error("Unsupported order direction: {0}")]
    UnsupportedOrderDirection(String),

    /// Result does not fit into u64 base units.
    #[error("Price overflow: {0}")]
    PriceOverflow(String),

    #[error("Slippage tolerance of {0} bps exceeds 10000 bps")]
    InvalidSlippage(u64),

    #[error("Counter out of range: {0}")]
    CounterOutOfRange(i64),

    #[error("Configuration error: {0}")]
    Config(String),
}
