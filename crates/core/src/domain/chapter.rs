use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

/// Two-digit tariff chapter, the unit at which free-text rules and marketplace
/// taxonomy signals are reconciled. Renders as `Chapter 61`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chapter(u8);

impl Chapter {
    pub const COFFEE_TEA: Chapter = Chapter(9);
    pub const COSMETICS: Chapter = Chapter(33);
    pub const PLASTICS: Chapter = Chapter(39);
    pub const LEATHER_GOODS: Chapter = Chapter(42);
    pub const APPAREL_KNIT: Chapter = Chapter(61);
    pub const APPAREL_WOVEN: Chapter = Chapter(62);
    pub const MADE_UP_TEXTILES: Chapter = Chapter(63);
    pub const FOOTWEAR: Chapter = Chapter(64);
    pub const HEADGEAR: Chapter = Chapter(65);
    pub const JEWELRY: Chapter = Chapter(71);
    pub const MACHINERY: Chapter = Chapter(84);
    pub const ELECTRONICS: Chapter = Chapter(85);
    pub const AUTOMOTIVE: Chapter = Chapter(87);
    pub const WATCHES: Chapter = Chapter(91);
    pub const FURNITURE: Chapter = Chapter(94);
    pub const TOYS_SPORTS: Chapter = Chapter(95);

    pub fn new(number: u8) -> Result<Self, DomainError> {
        if (1..=99).contains(&number) {
            Ok(Self(number))
        } else {
            Err(DomainError::InvariantViolation(format!("chapter number {number} is outside 1..=99")))
        }
    }

    /// Infallible constructor for built-in tables; `Corpus::validate` rechecks the range.
    pub(crate) const fn of(number: u8) -> Self {
        Self(number)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// True when `code` (e.g. `6109.10` or `6109.10.0012`) starts with this chapter's digits.
    pub fn owns_code(self, code: &str) -> bool {
        code.as_bytes().get(..2).map(|prefix| prefix == format!("{:02}", self.0).as_bytes())
            == Some(true)
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chapter {:02}", self.0)
    }
}

impl FromStr for Chapter {
    type Err = DomainError;

    /// Accepts `Chapter 61`, `chapter 9`, `61` and `09`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed
            .get(..7)
            .filter(|prefix| prefix.eq_ignore_ascii_case("chapter"))
            .map(|_| trimmed[7..].trim())
            .unwrap_or(trimmed);

        digits
            .parse::<u8>()
            .map_err(|_| DomainError::InvariantViolation(format!("`{value}` is not a chapter label")))
            .and_then(Self::new)
    }
}

impl Serialize for Chapter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Chapter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Chapter;

    #[test]
    fn chapter_labels_round_trip_through_display() {
        let chapter: Chapter = "Chapter 09".parse().expect("parse label");
        assert_eq!(chapter, Chapter::COFFEE_TEA);
        assert_eq!(chapter.to_string(), "Chapter 09");
        assert_eq!("87".parse::<Chapter>().expect("parse digits"), Chapter::AUTOMOTIVE);
        assert_eq!("chapter 61".parse::<Chapter>().expect("parse lowercase"), Chapter::APPAREL_KNIT);
    }

    #[test]
    fn invalid_chapter_labels_are_rejected() {
        assert!("N/A".parse::<Chapter>().is_err());
        assert!("Chapter 0".parse::<Chapter>().is_err());
        assert!("Chapter 100".parse::<Chapter>().is_err());
    }

    #[test]
    fn chapter_owns_codes_with_matching_prefix() {
        assert!(Chapter::COFFEE_TEA.owns_code("0901.21"));
        assert!(Chapter::APPAREL_KNIT.owns_code("6109.10.0012"));
        assert!(!Chapter::APPAREL_KNIT.owns_code("6205.20"));
        assert!(!Chapter::APPAREL_KNIT.owns_code("6"));
    }
}
