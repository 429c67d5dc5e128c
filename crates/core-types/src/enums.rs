use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "buy"),
            TradeAction::Sell => write!(f, "sell"),
        }
    }
}

/// One of the four elemental categories. Every zodiac sign belongs to exactly
/// one element, and every stock inherits the element of its assigned sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    /// All elements in their canonical display order.
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        };
        write!(f, "{}", name)
    }
}

/// The twelve zodiac signs. Signs are assigned to users at onboarding (from
/// their birthdate) and to stocks by the stock directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Returns the element this sign belongs to.
    pub fn element(&self) -> Element {
        match self {
            ZodiacSign::Aries | ZodiacSign::Leo | ZodiacSign::Sagittarius => Element::Fire,
            ZodiacSign::Taurus | ZodiacSign::Virgo | ZodiacSign::Capricorn => Element::Earth,
            ZodiacSign::Gemini | ZodiacSign::Libra | ZodiacSign::Aquarius => Element::Air,
            ZodiacSign::Cancer | ZodiacSign::Scorpio | ZodiacSign::Pisces => Element::Water,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ZodiacSign {
    type Err = CoreError;

    /// Parses a sign name case-insensitively, as received from config files
    /// and API payloads.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aries" => Ok(ZodiacSign::Aries),
            "taurus" => Ok(ZodiacSign::Taurus),
            "gemini" => Ok(ZodiacSign::Gemini),
            "cancer" => Ok(ZodiacSign::Cancer),
            "leo" => Ok(ZodiacSign::Leo),
            "virgo" => Ok(ZodiacSign::Virgo),
            "libra" => Ok(ZodiacSign::Libra),
            "scorpio" => Ok(ZodiacSign::Scorpio),
            "sagittarius" => Ok(ZodiacSign::Sagittarius),
            "capricorn" => Ok(ZodiacSign::Capricorn),
            "aquarius" => Ok(ZodiacSign::Aquarius),
            "pisces" => Ok(ZodiacSign::Pisces),
            other => Err(CoreError::UnknownSign(other.to_string())),
        }
    }
}

/// The compatibility category between the account holder's sign and a stock's
/// sign, as produced by the alignment rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    SameSign,
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchType::SameSign => "same_sign",
            MatchType::Positive => "positive",
            MatchType::Neutral => "neutral",
            MatchType::Negative => "negative",
        };
        write!(f, "{}", name)
    }
}
