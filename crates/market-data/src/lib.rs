//! # Astrofolio Market Data Crate
//!
//! Collaborator seams between the valuation engine and the outside market
//! world: the `PriceFeed` that supplies live quotes and the `StockDirectory`
//! that assigns each ticker its zodiac identity.
//!
//! Both traits are synchronous from the engine's point of view. A miss is an
//! `Option::None`, never an error: the engine degrades the affected position
//! instead of failing the whole valuation.
//!
//! The `StaticPriceFeed` and `StaticDirectory` implementations back the demo
//! command and the test suites; a production deployment would put a real feed
//! behind the same traits.

pub mod feed;

pub use feed::{StaticDirectory, StaticPriceFeed};

use core_types::{PriceQuote, StockProfile};

/// Supplies the current market quote for a ticker.
pub trait PriceFeed: Send + Sync {
    /// Returns the latest quote, or `None` when the feed has nothing for the
    /// ticker (unknown symbol, feed outage).
    fn quote(&self, ticker: &str) -> Option<PriceQuote>;
}

/// Assigns every listed ticker its zodiac identity.
pub trait StockDirectory: Send + Sync {
    /// Returns the stock's profile. Every ticker resolves to a profile; a
    /// directory that has no curated entry derives a deterministic one.
    fn profile(&self, ticker: &str) -> StockProfile;
}
