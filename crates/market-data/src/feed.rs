use crate::{PriceFeed, StockDirectory};
use core_types::{PriceQuote, StockProfile, ZodiacSign};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

/// An in-memory price feed backed by a quote table.
///
/// Quotes can be replaced at runtime, which is how the demo command moves
/// prices between trades. Unknown tickers return `None`, exercising the same
/// degraded-valuation path a feed outage would.
#[derive(Debug, Default)]
pub struct StaticPriceFeed {
    quotes: RwLock<HashMap<String, PriceQuote>>,
}

impl StaticPriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the quote for a ticker.
    pub fn set_quote(&self, ticker: &str, current_price: Decimal, previous_close: Decimal) {
        let quote = PriceQuote {
            ticker: ticker.to_string(),
            current_price,
            previous_close,
        };
        self.quotes
            .write()
            .expect("price feed lock poisoned")
            .insert(ticker.to_string(), quote);
    }

    /// Drops the quote for a ticker, simulating a feed gap.
    pub fn clear_quote(&self, ticker: &str) {
        self.quotes
            .write()
            .expect("price feed lock poisoned")
            .remove(ticker);
    }
}

impl PriceFeed for StaticPriceFeed {
    fn quote(&self, ticker: &str) -> Option<PriceQuote> {
        let quotes = self.quotes.read().expect("price feed lock poisoned");
        let quote = quotes.get(ticker).cloned();
        if quote.is_none() {
            tracing::debug!(ticker, "No quote available; valuation will degrade.");
        }
        quote
    }
}

/// An in-memory stock directory with curated entries and a deterministic
/// fallback.
///
/// Tickers without a curated entry are assigned a sign derived from the
/// ticker's bytes, so the same symbol always resolves to the same sign.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    entries: RwLock<HashMap<String, ZodiacSign>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Curates a sign assignment for a ticker, overriding the derived one.
    pub fn assign(&self, ticker: &str, sign: ZodiacSign) {
        self.entries
            .write()
            .expect("directory lock poisoned")
            .insert(ticker.to_string(), sign);
    }

    /// Parses and curates an assignment, for config-driven listings.
    pub fn assign_str(&self, ticker: &str, sign: &str) -> Result<(), core_types::CoreError> {
        let sign = ZodiacSign::from_str(sign)?;
        self.assign(ticker, sign);
        Ok(())
    }

    fn derived_sign(ticker: &str) -> ZodiacSign {
        // Stable fold over the ticker bytes so assignment survives restarts.
        let sum: u32 = ticker
            .to_ascii_uppercase()
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
        ZodiacSign::ALL[(sum % 12) as usize]
    }
}

impl StockDirectory for StaticDirectory {
    fn profile(&self, ticker: &str) -> StockProfile {
        let curated = self
            .entries
            .read()
            .expect("directory lock poisoned")
            .get(ticker)
            .copied();
        let sign = curated.unwrap_or_else(|| Self::derived_sign(ticker));
        StockProfile::new(ticker, sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_feed_returns_latest_quote() {
        let feed = StaticPriceFeed::new();
        feed.set_quote("AAPL", dec!(175), dec!(170));
        feed.set_quote("AAPL", dec!(180), dec!(175));

        let quote = feed.quote("AAPL").unwrap();
        assert_eq!(quote.current_price, dec!(180));
        assert_eq!(quote.previous_close, dec!(175));
    }

    #[test]
    fn test_feed_miss_is_none() {
        let feed = StaticPriceFeed::new();
        assert!(feed.quote("MISSING").is_none());

        feed.set_quote("GONE", dec!(10), dec!(10));
        feed.clear_quote("GONE");
        assert!(feed.quote("GONE").is_none());
    }

    #[test]
    fn test_directory_prefers_curated_entry() {
        let directory = StaticDirectory::new();
        directory.assign("TSLA", ZodiacSign::Aries);

        let profile = directory.profile("TSLA");
        assert_eq!(profile.sign, ZodiacSign::Aries);
        assert_eq!(profile.element, ZodiacSign::Aries.element());
    }

    #[test]
    fn test_derived_sign_is_stable() {
        let directory = StaticDirectory::new();
        let first = directory.profile("NVDA");
        let second = directory.profile("NVDA");
        assert_eq!(first.sign, second.sign);
        // Case differences must not reassign a ticker.
        assert_eq!(directory.profile("nvda").sign, first.sign);
    }
}
