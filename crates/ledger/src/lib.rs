//! # Astrofolio Ledger Crate
//!
//! This crate provides the cost-basis ledger: the unit of truth for "what
//! does this account own and at what average price".
//!
//! ## Architectural Principles
//!
//! - **Validate, then mutate:** `validator::validate` is a pure gate with no
//!   side effects; `ledger::apply` is the single state transition. A request
//!   that fails either step leaves the account byte-for-byte unchanged, so
//!   concurrent readers can never observe a half-applied trade.
//! - **Consideration is authoritative:** cost-basis arithmetic works from the
//!   trade's total consideration, never from a re-derived quantity-times-price,
//!   so the basis always reflects what was actually paid.
//!
//! ## Public API
//!
//! - `validate`: the trade validity gate.
//! - `apply`: the buy/sell state transition, returning a `TradeFill`.
//! - `TradeError`: the rejection reasons surfaced verbatim to callers.

// Declare the modules that constitute this crate.
pub mod error;
pub mod ledger;
pub mod validator;

// Re-export the key components to provide a clean, public-facing API.
pub use error::TradeError;
pub use ledger::{apply, TradeFill};
pub use validator::validate;
