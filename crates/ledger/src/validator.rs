use crate::error::TradeError;
use core_types::{Account, TradeAction, TradeRequest};
use rust_decimal::Decimal;

/// Gate in front of the ledger: rejects malformed or unaffordable trades
/// before any mutation happens.
///
/// Checks run in a fixed order so callers always see the most fundamental
/// problem first:
/// 1. quantity and total value must be positive,
/// 2. a buy must be covered by the cash balance,
/// 3. a sell needs an open position holding at least the requested quantity.
///
/// Rejection has no side effects; the account is untouched.
pub fn validate(account: &Account, request: &TradeRequest) -> Result<(), TradeError> {
    if request.quantity <= Decimal::ZERO || request.total_value <= Decimal::ZERO {
        return Err(TradeError::InvalidQuantity {
            quantity: request.quantity,
            total_value: request.total_value,
        });
    }

    match request.action {
        TradeAction::Buy => {
            if request.total_value > account.cash_balance {
                return Err(TradeError::InsufficientFunds {
                    required: request.total_value,
                    available: account.cash_balance,
                });
            }
        }
        TradeAction::Sell => {
            let position = account
                .position(&request.ticker)
                .ok_or_else(|| TradeError::PositionNotFound(request.ticker.clone()))?;

            if request.quantity > position.quantity {
                return Err(TradeError::InsufficientShares {
                    ticker: request.ticker.clone(),
                    requested: request.quantity,
                    available: position.quantity,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ZodiacSign;
    use rust_decimal_macros::dec;

    fn request(action: TradeAction, quantity: Decimal, total_value: Decimal) -> TradeRequest {
        TradeRequest {
            ticker: "AAPL".to_string(),
            action,
            quantity,
            total_value,
        }
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let account = Account::new(ZodiacSign::Leo, dec!(1000));

        let err = validate(&account, &request(TradeAction::Buy, dec!(0), dec!(100))).unwrap_err();
        assert!(matches!(err, TradeError::InvalidQuantity { .. }));

        let err = validate(&account, &request(TradeAction::Sell, dec!(1), dec!(-5))).unwrap_err();
        assert!(matches!(err, TradeError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_rejects_buy_beyond_cash_balance() {
        let account = Account::new(ZodiacSign::Leo, dec!(4000));

        let err = validate(&account, &request(TradeAction::Buy, dec!(10), dec!(5000))).unwrap_err();
        assert_eq!(
            err,
            TradeError::InsufficientFunds {
                required: dec!(5000),
                available: dec!(4000),
            }
        );
    }

    #[test]
    fn test_buy_exactly_at_cash_balance_is_allowed() {
        let account = Account::new(ZodiacSign::Leo, dec!(5000));
        assert!(validate(&account, &request(TradeAction::Buy, dec!(10), dec!(5000))).is_ok());
    }

    #[test]
    fn test_rejects_sell_without_position() {
        let account = Account::new(ZodiacSign::Leo, dec!(1000));

        let err = validate(&account, &request(TradeAction::Sell, dec!(1), dec!(100))).unwrap_err();
        assert_eq!(err, TradeError::PositionNotFound("AAPL".to_string()));
    }

    #[test]
    fn test_rejection_leaves_account_untouched() {
        let account = Account::new(ZodiacSign::Leo, dec!(1000));
        let before = account.clone();

        let _ = validate(&account, &request(TradeAction::Buy, dec!(10), dec!(5000)));
        let _ = validate(&account, &request(TradeAction::Sell, dec!(1), dec!(100)));

        assert_eq!(account, before);
    }
}
