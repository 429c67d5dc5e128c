pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Element, MatchType, TradeAction, ZodiacSign};
pub use error::CoreError;
pub use structs::{Account, Position, PriceQuote, StockProfile, TradeRequest};
