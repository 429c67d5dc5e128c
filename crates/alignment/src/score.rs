use core_types::MatchType;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Maps a compatibility category to its numeric alignment score.
///
/// An unrecognized or missing category degrades to the neutral score; this
/// function must never fail, so a gap in the rule table can at worst flatten
/// a position's score, never break a valuation.
pub fn score_for(match_type: Option<MatchType>) -> Decimal {
    match match_type {
        Some(MatchType::SameSign) => dec!(100),
        Some(MatchType::Positive) => dec!(85),
        Some(MatchType::Neutral) => dec!(65),
        Some(MatchType::Negative) => dec!(40),
        None => dec!(65),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_per_category() {
        assert_eq!(score_for(Some(MatchType::SameSign)), dec!(100));
        assert_eq!(score_for(Some(MatchType::Positive)), dec!(85));
        assert_eq!(score_for(Some(MatchType::Neutral)), dec!(65));
        assert_eq!(score_for(Some(MatchType::Negative)), dec!(40));
    }

    #[test]
    fn test_missing_category_degrades_to_neutral() {
        assert_eq!(score_for(None), dec!(65));
    }
}
