use crate::error::TradeError;
use chrono::{DateTime, Utc};
use core_types::{Account, Position, StockProfile, TradeAction, TradeRequest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Residual quantity below this threshold counts as a full liquidation and
/// the position is removed instead of being kept as a dust row.
const DUST_EPSILON: Decimal = dec!(0.00000001);

/// The outcome of an applied trade.
///
/// `realized_gain_loss` is reported for sells (consideration received minus
/// the cost basis of the sold slice). It is informational only and is not
/// persisted as ledger state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeFill {
    pub ticker: String,
    pub action: TradeAction,
    pub quantity: Decimal,
    pub total_value: Decimal,
    pub realized_gain_loss: Option<Decimal>,
    pub executed_at: DateTime<Utc>,
}

/// Applies a validated trade to the account. This is the core state
/// transition of the ledger; it mutates cash and positions and nothing else.
///
/// The caller is expected to have run `validator::validate` first. The same
/// checks are re-asserted here so that a direct call can never drive the
/// account into a negative balance or an oversold position; either way a
/// failed call leaves the account exactly as it was.
///
/// Buy cost-basis rule: the new average is total consideration paid divided
/// by total quantity held. The basis tracks what was actually paid, not a
/// recomputed quantity-times-price.
///
/// Sell rule: the remaining shares keep their average cost basis untouched;
/// only the quantity shrinks and cash grows by the consideration received.
pub fn apply(
    account: &mut Account,
    request: &TradeRequest,
    profile: &StockProfile,
    now: DateTime<Utc>,
) -> Result<TradeFill, TradeError> {
    if request.quantity <= Decimal::ZERO || request.total_value <= Decimal::ZERO {
        return Err(TradeError::InvalidQuantity {
            quantity: request.quantity,
            total_value: request.total_value,
        });
    }

    let realized_gain_loss = match request.action {
        TradeAction::Buy => {
            if request.total_value > account.cash_balance {
                return Err(TradeError::InsufficientFunds {
                    required: request.total_value,
                    available: account.cash_balance,
                });
            }

            match account.positions.get_mut(&request.ticker) {
                Some(position) => {
                    let new_quantity = position.quantity + request.quantity;
                    position.average_cost_basis = (position.quantity
                        * position.average_cost_basis
                        + request.total_value)
                        / new_quantity;
                    position.quantity = new_quantity;
                    position.last_updated = now;
                }
                None => {
                    account.positions.insert(
                        request.ticker.clone(),
                        Position {
                            ticker: request.ticker.clone(),
                            quantity: request.quantity,
                            average_cost_basis: request.total_value / request.quantity,
                            sign: profile.sign,
                            element: profile.element,
                            opened_at: now,
                            last_updated: now,
                        },
                    );
                }
            }

            account.cash_balance -= request.total_value;
            None
        }
        TradeAction::Sell => {
            let position = account
                .positions
                .get_mut(&request.ticker)
                .ok_or_else(|| TradeError::PositionNotFound(request.ticker.clone()))?;

            if request.quantity > position.quantity {
                return Err(TradeError::InsufficientShares {
                    ticker: request.ticker.clone(),
                    requested: request.quantity,
                    available: position.quantity,
                });
            }

            let realized = request.total_value - request.quantity * position.average_cost_basis;

            position.quantity -= request.quantity;
            position.last_updated = now;

            // Full liquidation removes the row; dust below the epsilon counts.
            if position.quantity <= DUST_EPSILON {
                account.positions.remove(&request.ticker);
            }

            account.cash_balance += request.total_value;
            Some(realized)
        }
    };

    account.last_updated = now;

    tracing::debug!(
        account_id = %account.account_id,
        ticker = %request.ticker,
        action = %request.action,
        quantity = %request.quantity,
        total_value = %request.total_value,
        "Trade applied to ledger."
    );

    Ok(TradeFill {
        ticker: request.ticker.clone(),
        action: request.action,
        quantity: request.quantity,
        total_value: request.total_value,
        realized_gain_loss,
        executed_at: now,
    })
}
