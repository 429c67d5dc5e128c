use core_types::ZodiacSign;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSettings,
    pub accounts: AccountSettings,
    /// The curated stock universe the demo feed and directory are seeded
    /// with. An empty list is fine; unlisted tickers get derived signs and no
    /// quotes.
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// Bind address for the HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Parameters applied when a new account is opened.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSettings {
    /// The simulated cash balance every fresh account starts with.
    pub initial_cash: Decimal,
    /// The sign used when an onboarding request does not carry one.
    pub default_user_sign: ZodiacSign,
}

/// One curated stock: its zodiac identity and seed quote.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub ticker: String,
    pub sign: ZodiacSign,
    pub price: Decimal,
    pub previous_close: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            accounts: AccountSettings {
                initial_cash: dec!(100000),
                default_user_sign: ZodiacSign::Aries,
            },
            listings: Vec::new(),
        }
    }
}
