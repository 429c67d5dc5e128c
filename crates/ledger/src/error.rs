use rust_decimal::Decimal;
use thiserror::Error;

/// Validation rejections for a single trade request.
///
/// Every variant is terminal for that request: the account is left untouched
/// and the caller must resubmit a corrected trade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("Trade quantity and total value must both be positive. Quantity: {quantity}, Total value: {total_value}")]
    InvalidQuantity {
        quantity: Decimal,
        total_value: Decimal,
    },

    #[error("Not enough cash available to execute trade. Required: {required}, Available: {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("Not enough shares of {ticker} to sell. Requested: {requested}, Available: {available}")]
    InsufficientShares {
        ticker: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Position not found for ticker: {0}")]
    PositionNotFound(String),
}
