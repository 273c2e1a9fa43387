use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::rule::ClassificationRule;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    /// Set by an operator who overrode the automatic result.
    Manual,
}

impl ConfidenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Manual => "manual",
        }
    }

    /// Exact inverse of [`Self::as_str`], for labels this crate wrote itself.
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    /// Lenient parse for arbitrator output. Only the three automatic levels
    /// are accepted; anything else, `manual` included, becomes medium.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const UNCLASSIFIED_CHAPTER: &str = "N/A";

/// A ranked suggestion returned to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub hs6: String,
    pub hts10: String,
    pub jp_hs9: String,
    pub category: String,
    pub material: String,
    pub usage: String,
    /// `Chapter NN`, or `N/A` for the unclassifiable sentinel.
    pub chapter: String,
    pub reason: String,
    pub confidence: ConfidenceLevel,
}

impl Candidate {
    pub fn from_rule(
        rule: &ClassificationRule,
        confidence: ConfidenceLevel,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            hs6: rule.hs6.clone(),
            hts10: rule.hts10.clone(),
            jp_hs9: rule.jp_hs9.clone(),
            category: rule.category.clone(),
            material: rule.material.clone(),
            usage: rule.usage.clone(),
            chapter: rule.chapter.to_string(),
            reason: reason.into(),
            confidence,
        }
    }

    /// Placeholder returned when nothing in the corpus matched. Its codes are
    /// deliberately not valid tariff codes.
    pub fn unclassifiable(detail: Option<&str>) -> Self {
        let mut reason = "Could not classify automatically. Enter a more specific product name \
                          or description."
            .to_owned();
        if let Some(detail) = detail {
            reason.push_str(" (");
            reason.push_str(detail);
            reason.push(')');
        }
        Self {
            hs6: "----.--".to_owned(),
            hts10: "----.--.----".to_owned(),
            jp_hs9: "----.--.---".to_owned(),
            category: "Unclassified".to_owned(),
            material: "Unknown".to_owned(),
            usage: "Unknown".to_owned(),
            chapter: UNCLASSIFIED_CHAPTER.to_owned(),
            reason,
            confidence: ConfidenceLevel::Low,
        }
    }

    pub fn is_unclassifiable(&self) -> bool {
        self.chapter == UNCLASSIFIED_CHAPTER
    }
}

#[cfg(test)]
mod tests {
    use super::{Candidate, ConfidenceLevel};
    use crate::domain::rule::is_hs6_code;

    #[test]
    fn sentinel_is_low_confidence_with_invalid_codes() {
        let sentinel = Candidate::unclassifiable(None);
        assert!(sentinel.is_unclassifiable());
        assert_eq!(sentinel.confidence, ConfidenceLevel::Low);
        assert!(!is_hs6_code(&sentinel.hs6));
        assert!(sentinel.reason.contains("more specific"));
    }

    #[test]
    fn confidence_serializes_as_lowercase_label() {
        let encoded = serde_json::to_string(&ConfidenceLevel::Manual).expect("serialize");
        assert_eq!(encoded, "\"manual\"");
        assert_eq!(ConfidenceLevel::parse_lenient(" HIGH "), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::parse_lenient("certain"), ConfidenceLevel::Medium);
    }

    #[test]
    fn lenient_parse_never_yields_manual() {
        assert_eq!(ConfidenceLevel::parse_lenient("manual"), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::parse_lenient("Manual"), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_label("manual"), Some(ConfidenceLevel::Manual));
        assert_eq!(ConfidenceLevel::from_label("certain"), None);
    }
}
