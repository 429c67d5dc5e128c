//! Trading Flow Integration Tests
//!
//! End-to-end tests that drive the full validate → ledger → valuate pipeline
//! through the `TradingEngine`, the way the HTTP layer does:
//! - the canonical buy/re-buy/sell/liquidate ladder,
//! - rejection paths leaving state untouched,
//! - per-account serialization under concurrent trades,
//! - read-after-write consistency of summaries.

use alignment::HarmonyTable;
use core_types::{TradeAction, TradeRequest, ZodiacSign};
use engine::{EngineError, MemoryAccountStore, TradingEngine};
use ledger::TradeError;
use market_data::{StaticDirectory, StaticPriceFeed};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

struct Harness {
    engine: Arc<TradingEngine>,
    feed: Arc<StaticPriceFeed>,
}

fn make_engine() -> Harness {
    let store = Arc::new(MemoryAccountStore::new());
    let feed = Arc::new(StaticPriceFeed::new());
    let directory = Arc::new(StaticDirectory::new());
    directory.assign("AAPL", ZodiacSign::Virgo);
    directory.assign("TSLA", ZodiacSign::Aries);

    let engine = Arc::new(TradingEngine::new(
        store,
        feed.clone(),
        directory,
        Arc::new(HarmonyTable::new()),
    ));
    Harness { engine, feed }
}

fn trade(ticker: &str, action: TradeAction, quantity: Decimal, total_value: Decimal) -> TradeRequest {
    TradeRequest {
        ticker: ticker.to_string(),
        action,
        quantity,
        total_value,
    }
}

#[tokio::test]
async fn test_buy_rebuy_sell_liquidate_ladder() {
    let Harness { engine, feed } = make_engine();
    feed.set_quote("AAPL", dec!(200), dec!(198));

    let account = engine
        .open_account(ZodiacSign::Leo, dec!(100000))
        .await
        .unwrap();
    let id = account.account_id;

    // Buy 10 for 1750: basis 175.
    let receipt = engine
        .execute_trade(id, trade("AAPL", TradeAction::Buy, dec!(10), dec!(1750)))
        .await
        .unwrap();
    assert_eq!(receipt.snapshot.cash_balance, dec!(98250));
    let stored = engine.account(id).await.unwrap();
    assert_eq!(stored.position("AAPL").unwrap().average_cost_basis, dec!(175));

    // Buy 5 more for 950: basis re-averages to 180.
    engine
        .execute_trade(id, trade("AAPL", TradeAction::Buy, dec!(5), dec!(950)))
        .await
        .unwrap();
    let stored = engine.account(id).await.unwrap();
    assert_eq!(stored.position("AAPL").unwrap().quantity, dec!(15));
    assert_eq!(stored.position("AAPL").unwrap().average_cost_basis, dec!(180));
    assert_eq!(stored.cash_balance, dec!(97300));

    // Sell 8 for 1600: basis untouched, realized 160.
    let receipt = engine
        .execute_trade(id, trade("AAPL", TradeAction::Sell, dec!(8), dec!(1600)))
        .await
        .unwrap();
    assert_eq!(receipt.fill.realized_gain_loss, Some(dec!(160)));
    let stored = engine.account(id).await.unwrap();
    assert_eq!(stored.position("AAPL").unwrap().quantity, dec!(7));
    assert_eq!(stored.position("AAPL").unwrap().average_cost_basis, dec!(180));
    assert_eq!(stored.cash_balance, dec!(98900));

    // Sell the remaining 7 for 1500: position gone.
    engine
        .execute_trade(id, trade("AAPL", TradeAction::Sell, dec!(7), dec!(1500)))
        .await
        .unwrap();
    let stored = engine.account(id).await.unwrap();
    assert!(stored.position("AAPL").is_none());
    assert_eq!(stored.cash_balance, dec!(100400));
}

#[tokio::test]
async fn test_rejections_leave_stored_state_untouched() {
    let Harness { engine, .. } = make_engine();
    let account = engine
        .open_account(ZodiacSign::Leo, dec!(4000))
        .await
        .unwrap();
    let id = account.account_id;
    let before = engine.account(id).await.unwrap();

    // Unaffordable buy.
    let err = engine
        .execute_trade(id, trade("AAPL", TradeAction::Buy, dec!(10), dec!(5000)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Trade(TradeError::InsufficientFunds { .. })
    ));

    // Sell with no position.
    let err = engine
        .execute_trade(id, trade("TSLA", TradeAction::Sell, dec!(1), dec!(100)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Trade(TradeError::PositionNotFound(_))
    ));

    // Zero quantity.
    let err = engine
        .execute_trade(id, trade("AAPL", TradeAction::Buy, dec!(0), dec!(100)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Trade(TradeError::InvalidQuantity { .. })
    ));

    assert_eq!(engine.account(id).await.unwrap(), before);
}

#[tokio::test]
async fn test_unknown_account_is_reported() {
    let Harness { engine, .. } = make_engine();
    let ghost = Uuid::new_v4();

    let err = engine.portfolio_summary(ghost).await.unwrap_err();
    assert!(matches!(err, EngineError::AccountNotFound(id) if id == ghost));

    let err = engine
        .execute_trade(ghost, trade("AAPL", TradeAction::Buy, dec!(1), dec!(100)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::AccountNotFound(_)));
}

#[tokio::test]
async fn test_summary_reflects_last_committed_trade() {
    let Harness { engine, feed } = make_engine();
    feed.set_quote("AAPL", dec!(180), dec!(178));

    let account = engine
        .open_account(ZodiacSign::Virgo, dec!(10000))
        .await
        .unwrap();
    let id = account.account_id;

    engine
        .execute_trade(id, trade("AAPL", TradeAction::Buy, dec!(10), dec!(1800)))
        .await
        .unwrap();

    let summary = engine.portfolio_summary(id).await.unwrap();
    assert_eq!(summary.cash_balance, dec!(8200));
    assert_eq!(summary.stocks_value, dec!(1800));
    assert_eq!(summary.total_value, dec!(10000));
    assert_eq!(summary.holdings.len(), 1);
    // AAPL is curated as Virgo; a Virgo user gets a same-sign match.
    assert_eq!(summary.overall_alignment_score, 100);
}

#[tokio::test]
async fn test_concurrent_buys_do_not_lose_updates() {
    let Harness { engine, feed } = make_engine();
    feed.set_quote("AAPL", dec!(100), dec!(100));

    let account = engine
        .open_account(ZodiacSign::Leo, dec!(100000))
        .await
        .unwrap();
    let id = account.account_id;

    // 50 concurrent buys of 1 share for 100 each. If read-modify-write ever
    // interleaved, the final cash balance would come up short.
    let mut handles = Vec::new();
    for _ in 0..50 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine
                .execute_trade(id, trade("AAPL", TradeAction::Buy, dec!(1), dec!(100)))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = engine.account(id).await.unwrap();
    assert_eq!(stored.cash_balance, dec!(95000));
    assert_eq!(stored.position("AAPL").unwrap().quantity, dec!(50));
    assert_eq!(stored.position("AAPL").unwrap().average_cost_basis, dec!(100));
}

#[tokio::test]
async fn test_accounts_trade_independently() {
    let Harness { engine, feed } = make_engine();
    feed.set_quote("TSLA", dec!(250), dec!(245));

    let first = engine
        .open_account(ZodiacSign::Aries, dec!(5000))
        .await
        .unwrap();
    let second = engine
        .open_account(ZodiacSign::Pisces, dec!(5000))
        .await
        .unwrap();

    engine
        .execute_trade(
            first.account_id,
            trade("TSLA", TradeAction::Buy, dec!(2), dec!(500)),
        )
        .await
        .unwrap();

    let untouched = engine.account(second.account_id).await.unwrap();
    assert_eq!(untouched.cash_balance, dec!(5000));
    assert!(untouched.positions.is_empty());
}
