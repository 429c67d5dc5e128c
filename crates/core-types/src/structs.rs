use crate::enums::{Element, TradeAction, ZodiacSign};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The zodiac identity the stock directory assigns to a listed ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockProfile {
    pub ticker: String,
    pub sign: ZodiacSign,
    pub element: Element,
}

impl StockProfile {
    pub fn new(ticker: impl Into<String>, sign: ZodiacSign) -> Self {
        Self {
            ticker: ticker.into(),
            sign,
            element: sign.element(),
        }
    }
}

/// A held quantity of one ticker plus its average cost per unit.
///
/// Invariant: a position with zero quantity must not exist in the account's
/// map; the ledger removes it instead of retaining a zero row.
/// `average_cost_basis` is cost per unit, not total cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    pub quantity: Decimal,
    pub average_cost_basis: Decimal,
    /// The zodiac sign of the underlying stock, stamped at first buy.
    pub sign: ZodiacSign,
    /// The elemental category of the stock's sign.
    pub element: Element,
    pub opened_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Position {
    /// Total consideration paid for the currently held quantity.
    pub fn cost_basis_total(&self) -> Decimal {
        self.quantity * self.average_cost_basis
    }
}

/// The per-user unit of ledger state: cash plus open positions.
///
/// Invariant: `cash_balance` never goes negative as the result of an
/// accepted trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: Uuid,
    /// The account holder's zodiac sign, set once at onboarding.
    pub user_sign: ZodiacSign,
    pub cash_balance: Decimal,
    pub positions: HashMap<String, Position>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Account {
    /// Creates a fresh account with starting capital and no positions.
    pub fn new(user_sign: ZodiacSign, initial_cash: Decimal) -> Self {
        let now = Utc::now();
        Self {
            account_id: Uuid::new_v4(),
            user_sign,
            cash_balance: initial_cash,
            positions: HashMap::new(),
            created_at: now,
            last_updated: now,
        }
    }

    pub fn position(&self, ticker: &str) -> Option<&Position> {
        self.positions.get(ticker)
    }
}

/// A single buy or sell order against an account.
///
/// `total_value` is the caller-supplied consideration for the trade (quantity
/// times the execution price the caller saw). The engine treats it as the
/// authoritative amount and does not re-derive it from a live quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub ticker: String,
    pub action: TradeAction,
    pub quantity: Decimal,
    pub total_value: Decimal,
}

/// A live market quote for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub ticker: String,
    pub current_price: Decimal,
    pub previous_close: Decimal,
}
