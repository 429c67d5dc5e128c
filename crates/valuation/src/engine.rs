use crate::report::{AlignmentBreakdown, ElementDistribution, PortfolioSnapshot, PositionValuation};
use alignment::{score_for, AlignmentLookup};
use chrono::{DateTime, Utc};
use core_types::{Account, Element, Position, ZodiacSign};
use market_data::PriceFeed;
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Points of cosmic vibe granted per element represented in the holdings.
const DIVERSITY_BONUS_PER_ELEMENT: u32 = 3;
/// Upper bound on the diversity bonus.
const DIVERSITY_BONUS_CAP: u32 = 15;

/// A stateless calculator that derives the full portfolio valuation from the
/// current account state plus live quotes and alignment categories.
///
/// Calling `snapshot` twice with identical inputs yields identical output; it
/// reads the collaborators but mutates nothing.
#[derive(Debug, Default)]
pub struct Valuator {}

impl Valuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the complete valuation snapshot for an account.
    ///
    /// A missing quote never fails the snapshot: the affected position is
    /// valued at its average cost basis and flagged `price_stale`, so a feed
    /// outage degrades the numbers instead of taking the read path down.
    pub fn snapshot(
        &self,
        account: &Account,
        price_feed: &dyn PriceFeed,
        alignment: &dyn AlignmentLookup,
        now: DateTime<Utc>,
    ) -> PortfolioSnapshot {
        // --- 1. Value each position ---
        let mut holdings: Vec<PositionValuation> = account
            .positions
            .values()
            .map(|position| self.valuate_position(position, account.user_sign, price_feed, alignment))
            .collect();
        // The positions map has no inherent order; sort for stable output.
        holdings.sort_by(|a, b| a.ticker.cmp(&b.ticker));

        // --- 2. Portfolio-level aggregates ---
        let stocks_value: Decimal = holdings.iter().map(|h| h.current_value).sum();
        let total_cost_basis: Decimal = holdings.iter().map(|h| h.cost_basis_total).sum();
        let total_gain_loss = stocks_value - total_cost_basis;
        let total_gain_loss_percent = if total_cost_basis.is_zero() {
            Decimal::ZERO
        } else {
            total_gain_loss / total_cost_basis * Decimal::from(100)
        };

        // --- 3. Value-weighted alignment score ---
        let overall_alignment_score = if stocks_value.is_zero() {
            0
        } else {
            let weighted: Decimal = holdings
                .iter()
                .map(|h| h.alignment_score * h.current_value)
                .sum();
            round_to_u32(weighted / stocks_value)
        };

        // --- 4. Element distribution and diversity bonus ---
        let mut value_per_element: HashMap<Element, Decimal> = HashMap::new();
        for holding in &holdings {
            *value_per_element.entry(holding.element).or_default() += holding.current_value;
        }

        let mut element_distribution = ElementDistribution::default();
        if !stocks_value.is_zero() {
            for element in Element::ALL {
                if let Some(value) = value_per_element.get(&element) {
                    // Each percentage rounds independently; the four may not
                    // sum to exactly 100.
                    element_distribution.set(
                        element,
                        round_to_u32(value / stocks_value * Decimal::from(100)),
                    );
                }
            }
        }

        let elements_present = value_per_element
            .values()
            .filter(|value| !value.is_zero())
            .count() as u32;
        let diversity_bonus =
            (DIVERSITY_BONUS_PER_ELEMENT * elements_present).min(DIVERSITY_BONUS_CAP);

        // --- 5. Cosmic vibe index and breakdown ---
        let cosmic_vibe_index = (overall_alignment_score + diversity_bonus).min(100);

        let mut alignment_breakdown = AlignmentBreakdown::default();
        for holding in &holdings {
            alignment_breakdown.record(holding.match_type);
        }

        PortfolioSnapshot {
            cash_balance: account.cash_balance,
            stocks_value,
            total_value: account.cash_balance + stocks_value,
            total_cost_basis,
            total_gain_loss,
            total_gain_loss_percent,
            overall_alignment_score,
            cosmic_vibe_index,
            element_distribution,
            alignment_breakdown,
            holdings,
            as_of: now,
        }
    }

    /// Values a single position against the live quote and alignment rules.
    fn valuate_position(
        &self,
        position: &Position,
        user_sign: ZodiacSign,
        price_feed: &dyn PriceFeed,
        alignment: &dyn AlignmentLookup,
    ) -> PositionValuation {
        let (current_price, price_stale) = match price_feed.quote(&position.ticker) {
            Some(quote) => (quote.current_price, false),
            None => {
                tracing::warn!(
                    ticker = %position.ticker,
                    "No live quote available; valuing position at its cost basis."
                );
                (position.average_cost_basis, true)
            }
        };

        let current_value = position.quantity * current_price;
        let cost_basis_total = position.cost_basis_total();
        let gain_loss = current_value - cost_basis_total;
        let gain_loss_percent = if cost_basis_total.is_zero() {
            Decimal::ZERO
        } else {
            gain_loss / cost_basis_total * Decimal::from(100)
        };

        let match_type = alignment.classify(user_sign, position.sign);
        let alignment_score = score_for(match_type);

        PositionValuation {
            ticker: position.ticker.clone(),
            quantity: position.quantity,
            average_cost_basis: position.average_cost_basis,
            sign: position.sign,
            element: position.element,
            current_price,
            current_value,
            cost_basis_total,
            gain_loss,
            gain_loss_percent,
            alignment_score,
            match_type,
            price_stale,
        }
    }
}

/// Conventional half-up rounding to a whole number, clamped at zero.
fn round_to_u32(value: Decimal) -> u32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}
