//! # Astrofolio Engine Crate
//!
//! The central orchestrator: wires the trade validator, the cost-basis
//! ledger, and the valuator into the two public operations, `execute_trade`
//! and `portfolio_summary`.
//!
//! ## Architectural Principles
//!
//! - **Validate → apply → save, under one lock:** every trade runs its whole
//!   read-modify-write sequence while holding that account's mutex, so two
//!   concurrent trades on one account can never interleave and lose an
//!   update. Trades on different accounts share nothing and run in parallel.
//! - **Reads never block writes:** summaries load the committed account from
//!   the store without taking the trade lock. They see either the pre- or
//!   post-trade state of an in-flight trade, never a partial one.
//!
//! ## Public API
//!
//! - `TradingEngine`: the orchestrator owning the collaborator handles.
//! - `AccountStore` / `MemoryAccountStore`: the persistence seam.
//! - `TradeReceipt`: what a successful trade returns.
//! - `EngineError`: the error surface of the two public operations.

use alignment::AlignmentLookup;
use chrono::Utc;
use core_types::{Account, TradeAction, TradeRequest, ZodiacSign};
use ledger::TradeFill;
use market_data::{PriceFeed, StockDirectory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use valuation::{PortfolioSnapshot, Valuator};

pub mod error;
pub mod store;

pub use error::EngineError;
pub use store::{AccountStore, MemoryAccountStore};

/// The response to a successfully executed trade: a human-readable message,
/// the fill details, and a snapshot recomputed from the post-trade state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub message: String,
    pub fill: TradeFill,
    pub snapshot: PortfolioSnapshot,
}

/// The central orchestrator for trading and valuation.
pub struct TradingEngine {
    // --- Collaborators ---
    store: Arc<dyn AccountStore>,
    price_feed: Arc<dyn PriceFeed>,
    directory: Arc<dyn StockDirectory>,
    alignment: Arc<dyn AlignmentLookup>,
    valuator: Valuator,

    // --- Per-account serialization ---
    // One mutex per account id; trades hold it across the whole
    // load-validate-apply-save sequence.
    account_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl TradingEngine {
    /// Creates a new `TradingEngine` wired to its collaborators.
    pub fn new(
        store: Arc<dyn AccountStore>,
        price_feed: Arc<dyn PriceFeed>,
        directory: Arc<dyn StockDirectory>,
        alignment: Arc<dyn AlignmentLookup>,
    ) -> Self {
        Self {
            store,
            price_feed,
            directory,
            alignment,
            valuator: Valuator::new(),
            account_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Opens a fresh account with starting capital and no positions.
    pub async fn open_account(
        &self,
        user_sign: ZodiacSign,
        initial_cash: Decimal,
    ) -> Result<Account, EngineError> {
        let account = Account::new(user_sign, initial_cash);
        self.store.save(&account).await?;
        tracing::info!(
            account_id = %account.account_id,
            sign = %user_sign,
            initial_cash = %initial_cash,
            "Account opened."
        );
        Ok(account)
    }

    /// Returns the raw stored account state.
    pub async fn account(&self, account_id: Uuid) -> Result<Account, EngineError> {
        self.store
            .load(account_id)
            .await?
            .ok_or(EngineError::AccountNotFound(account_id))
    }

    /// Executes a trade against the account and returns the fresh snapshot.
    ///
    /// Validation fully precedes mutation; a rejected trade leaves the stored
    /// account untouched and surfaces the rejection reason verbatim.
    pub async fn execute_trade(
        &self,
        account_id: Uuid,
        request: TradeRequest,
    ) -> Result<TradeReceipt, EngineError> {
        let account_lock = self.lock_for(account_id).await;
        let _guard = account_lock.lock().await;

        let mut account = self
            .store
            .load(account_id)
            .await?
            .ok_or(EngineError::AccountNotFound(account_id))?;

        ledger::validate(&account, &request)?;

        let profile = self.directory.profile(&request.ticker);
        let fill = ledger::apply(&mut account, &request, &profile, Utc::now())?;
        self.store.save(&account).await?;

        tracing::info!(
            account_id = %account_id,
            ticker = %fill.ticker,
            action = %fill.action,
            quantity = %fill.quantity,
            total_value = %fill.total_value,
            "Trade executed."
        );

        let snapshot = self.valuator.snapshot(
            &account,
            self.price_feed.as_ref(),
            self.alignment.as_ref(),
            Utc::now(),
        );

        Ok(TradeReceipt {
            message: receipt_message(&fill),
            fill,
            snapshot,
        })
    }

    /// Computes the current valuation snapshot for the account.
    ///
    /// Read-only: skips the trade lock entirely and valuates the most
    /// recently committed account state.
    pub async fn portfolio_summary(
        &self,
        account_id: Uuid,
    ) -> Result<PortfolioSnapshot, EngineError> {
        let account = self.account(account_id).await?;
        Ok(self.valuator.snapshot(
            &account,
            self.price_feed.as_ref(),
            self.alignment.as_ref(),
            Utc::now(),
        ))
    }

    /// Fetches (or lazily creates) the mutex serializing trades for one
    /// account.
    async fn lock_for(&self, account_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.account_locks.lock().await;
        locks
            .entry(account_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

fn receipt_message(fill: &TradeFill) -> String {
    let verb = match fill.action {
        TradeAction::Buy => "Bought",
        TradeAction::Sell => "Sold",
    };
    match fill.realized_gain_loss {
        Some(realized) => format!(
            "{} {} {} for {} (realized {})",
            verb, fill.quantity, fill.ticker, fill.total_value, realized
        ),
        None => format!(
            "{} {} {} for {}",
            verb, fill.quantity, fill.ticker, fill.total_value
        ),
    }
}
