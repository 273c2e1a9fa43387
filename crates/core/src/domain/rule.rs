use serde::{Deserialize, Serialize};

use crate::domain::chapter::Chapter;
use crate::errors::DomainError;

/// One entry of the keyword rule corpus: the codes to report when the
/// product text mentions any of `keywords`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub keywords: Vec<String>,
    pub category: String,
    pub material: String,
    pub usage: String,
    pub hs6: String,
    pub hts10: String,
    pub jp_hs9: String,
    pub chapter: Chapter,
    pub reason: String,
}

impl ClassificationRule {
    /// Keywords are stored lowercase so matching can run against lowercased text.
    pub fn new(
        chapter: Chapter,
        codes: [&str; 3],
        category: &str,
        material: &str,
        usage: &str,
        keywords: &[&str],
        reason: &str,
    ) -> Self {
        let [hs6, hts10, jp_hs9] = codes;
        Self {
            keywords: keywords.iter().map(|keyword| keyword.to_lowercase()).collect(),
            category: category.to_owned(),
            material: material.to_owned(),
            usage: usage.to_owned(),
            hs6: hs6.to_owned(),
            hts10: hts10.to_owned(),
            jp_hs9: jp_hs9.to_owned(),
            chapter,
            reason: reason.to_owned(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.keywords.is_empty() || self.keywords.iter().any(|keyword| keyword.trim().is_empty())
        {
            return Err(DomainError::InvariantViolation(format!(
                "rule {} has an empty keyword",
                self.hs6
            )));
        }
        if self.keywords.iter().any(|keyword| keyword != &keyword.to_lowercase()) {
            return Err(DomainError::InvariantViolation(format!(
                "rule {} has a keyword that is not lowercase",
                self.hs6
            )));
        }
        if !is_hs6_code(&self.hs6) {
            return Err(DomainError::InvariantViolation(format!(
                "rule code `{}` is not of the form NNNN.NN",
                self.hs6
            )));
        }
        for code in [&self.hs6, &self.hts10, &self.jp_hs9] {
            if !self.chapter.owns_code(code) {
                return Err(DomainError::InvariantViolation(format!(
                    "code `{code}` does not belong to {}",
                    self.chapter
                )));
            }
        }
        Ok(())
    }
}

/// `NNNN.NN`, the six-digit international heading.
pub fn is_hs6_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 7
        && bytes[4] == b'.'
        && bytes.iter().enumerate().all(|(index, byte)| index == 4 || byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::{is_hs6_code, ClassificationRule};
    use crate::domain::chapter::Chapter;

    fn sample_rule() -> ClassificationRule {
        ClassificationRule::new(
            Chapter::HEADGEAR,
            ["6505.00", "6505.00.8015", "6505.00.000"],
            "Hats & caps",
            "Various",
            "Headwear",
            &["Hat", "cap"],
            "headgear",
        )
    }

    #[test]
    fn keywords_are_lowercased_on_construction() {
        assert_eq!(sample_rule().keywords, vec!["hat".to_owned(), "cap".to_owned()]);
    }

    #[test]
    fn well_formed_rule_validates() {
        assert_eq!(sample_rule().validate(), Ok(()));
    }

    #[test]
    fn rule_with_foreign_chapter_code_is_rejected() {
        let mut rule = sample_rule();
        rule.hts10 = "8708.99.8180".to_owned();
        assert!(rule.validate().is_err());
    }

    #[test]
    fn hs6_shape_is_enforced() {
        assert!(is_hs6_code("0901.21"));
        assert!(!is_hs6_code("0901.2"));
        assert!(!is_hs6_code("090121"));
        assert!(!is_hs6_code("09a1.21"));
    }
}
