use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    #[error("Trade rejected: {0}")]
    Trade(#[from] ledger::TradeError),

    #[error("Account store error: {0}")]
    Store(String),
}
