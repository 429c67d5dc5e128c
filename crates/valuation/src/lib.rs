//! # Astrofolio Valuation Crate
//!
//! Derives the full portfolio valuation: financial aggregates (market value,
//! cost basis, gain/loss) blended with the astrology-side numbers (the
//! value-weighted alignment score and the cosmic vibe index).
//!
//! The `Valuator` is a pure calculator over an `Account` plus the price-feed
//! and alignment collaborators. It holds no state and performs no I/O beyond
//! reading those collaborators, so the same inputs always produce the same
//! `PortfolioSnapshot`.

pub mod engine;
pub mod report;

pub use engine::Valuator;
pub use report::{AlignmentBreakdown, ElementDistribution, PortfolioSnapshot, PositionValuation};
