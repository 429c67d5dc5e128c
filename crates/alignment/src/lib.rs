//! # Astrofolio Alignment Crate
//!
//! This crate owns the astrology side of the valuation: the rule that turns a
//! (user sign, stock sign) pair into a compatibility category, and the mapping
//! from category to numeric score.
//!
//! The `AlignmentLookup` trait is the seam the valuation engine consumes; the
//! bundled `HarmonyTable` is the standard elemental rule table. Swapping in a
//! different table (or a remote rule service) only requires implementing the
//! trait.

pub mod harmony;
pub mod score;

pub use harmony::HarmonyTable;
pub use score::score_for;

use core_types::{MatchType, ZodiacSign};

/// Classifies the compatibility between the account holder's sign and a
/// stock's sign.
///
/// Returning `None` means the rule source has no answer for the pair; the
/// score mapping degrades that to a neutral score rather than failing the
/// valuation.
pub trait AlignmentLookup: Send + Sync {
    fn classify(&self, user_sign: ZodiacSign, stock_sign: ZodiacSign) -> Option<MatchType>;
}
