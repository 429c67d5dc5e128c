use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use core_types::{Account, TradeRequest, ZodiacSign};
use engine::TradeReceipt;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use valuation::PortfolioSnapshot;

#[derive(Debug, Deserialize)]
pub struct OpenAccountRequest {
    /// Defaults to the configured starting balance when omitted.
    pub initial_cash: Option<Decimal>,
    /// Defaults to the configured sign when omitted.
    pub user_sign: Option<ZodiacSign>,
}

/// # POST /api/accounts
/// Opens a fresh account with starting capital and no positions.
pub async fn open_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OpenAccountRequest>,
) -> Result<Json<Account>, AppError> {
    let initial_cash = payload
        .initial_cash
        .unwrap_or(state.account_defaults.initial_cash);
    if initial_cash <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "initial_cash must be greater than 0".to_string(),
        ));
    }
    let user_sign = payload
        .user_sign
        .unwrap_or(state.account_defaults.default_user_sign);

    let account = state.engine.open_account(user_sign, initial_cash).await?;
    Ok(Json(account))
}

/// # GET /api/accounts/:account_id
/// Fetches the raw ledger state for an account.
pub async fn get_account(
    Path(account_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Account>, AppError> {
    let account = state.engine.account(account_id).await?;
    Ok(Json(account))
}

/// # POST /api/accounts/:account_id/trades
/// Executes a buy or sell and returns the receipt with a fresh snapshot.
pub async fn execute_trade(
    Path(account_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<TradeRequest>,
) -> Result<Json<TradeReceipt>, AppError> {
    let receipt = state.engine.execute_trade(account_id, request).await?;
    Ok(Json(receipt))
}

/// # GET /api/accounts/:account_id/portfolio
/// Computes the current valuation snapshot for an account.
pub async fn get_portfolio_summary(
    Path(account_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PortfolioSnapshot>, AppError> {
    let snapshot = state.engine.portfolio_summary(account_id).await?;
    Ok(Json(snapshot))
}
