use chrono::{DateTime, Utc};
use core_types::{Element, MatchType, ZodiacSign};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One valued holding inside a snapshot: the position plus everything derived
/// from the current quote and the alignment rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionValuation {
    pub ticker: String,
    pub quantity: Decimal,
    pub average_cost_basis: Decimal,
    pub sign: ZodiacSign,
    pub element: Element,
    /// The price used for this valuation. Falls back to the average cost
    /// basis when the feed has no quote, in which case `price_stale` is set.
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub cost_basis_total: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percent: Decimal,
    pub alignment_score: Decimal,
    /// `None` when the rule table had no answer for the sign pair; the score
    /// already degraded to neutral.
    pub match_type: Option<MatchType>,
    pub price_stale: bool,
}

/// Share of the stocks value held in each element, as independently rounded
/// integer percentages. The four values may not sum to exactly 100; that
/// drift is documented behavior, not corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementDistribution {
    pub fire: u32,
    pub earth: u32,
    pub air: u32,
    pub water: u32,
}

impl ElementDistribution {
    pub fn get(&self, element: Element) -> u32 {
        match element {
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Air => self.air,
            Element::Water => self.water,
        }
    }

    pub(crate) fn set(&mut self, element: Element, percent: u32) {
        match element {
            Element::Fire => self.fire = percent,
            Element::Earth => self.earth = percent,
            Element::Air => self.air = percent,
            Element::Water => self.water = percent,
        }
    }
}

/// Position counts per match category. Counts, not value weights; a position
/// whose sign pair the rule table could not classify is counted as neutral,
/// matching the score fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlignmentBreakdown {
    pub same_sign: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl AlignmentBreakdown {
    pub(crate) fn record(&mut self, match_type: Option<MatchType>) {
        match match_type {
            Some(MatchType::SameSign) => self.same_sign += 1,
            Some(MatchType::Positive) => self.positive += 1,
            Some(MatchType::Neutral) | None => self.neutral += 1,
            Some(MatchType::Negative) => self.negative += 1,
        }
    }
}

/// The full valuation of an account at one moment.
///
/// Never stored: recomputed on every read from the current ledger state plus
/// fresh quotes and alignment categories, so it is always consistent with the
/// latest committed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub cash_balance: Decimal,
    pub stocks_value: Decimal,
    pub total_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_gain_loss: Decimal,
    pub total_gain_loss_percent: Decimal,
    /// Value-weighted mean of the per-position alignment scores, in [0, 100].
    pub overall_alignment_score: u32,
    /// Alignment score plus the diversity bonus, capped at 100.
    pub cosmic_vibe_index: u32,
    pub element_distribution: ElementDistribution,
    pub alignment_breakdown: AlignmentBreakdown,
    pub holdings: Vec<PositionValuation>,
    pub as_of: DateTime<Utc>,
}
