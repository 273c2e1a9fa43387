use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use crate::classify::matching::contains_term;
use crate::domain::chapter::Chapter;
use crate::errors::DomainError;

const AUTOMOTIVE_BRANDS: &[&str] = &[
    "honda", "toyota", "nissan", "mazda", "subaru", "mitsubishi", "suzuki", "daihatsu", "lexus",
    "infiniti", "acura", "scion", "ford", "chevrolet", "chevy", "gmc", "dodge", "chrysler",
    "jeep", "lincoln", "cadillac", "buick", "ram", "tesla", "bmw", "mercedes", "benz", "audi",
    "volkswagen", "vw", "porsche", "opel", "volvo", "saab", "fiat", "alfa romeo", "ferrari",
    "lamborghini", "maserati", "peugeot", "renault", "citroen", "hyundai", "kia", "daewoo",
    "ssangyong", "land rover", "rover", "jaguar", "bentley", "rolls-royce", "aston martin",
];

const ELECTRONICS_BRANDS: &[&str] = &[
    "apple", "samsung", "google", "sony", "lg", "huawei", "xiaomi", "oppo", "vivo", "oneplus",
    "realme", "motorola", "nokia", "asus", "acer", "lenovo", "dell", "hp", "microsoft",
    "toshiba", "sharp", "panasonic", "philips", "bose", "jbl", "sennheiser", "anker", "belkin",
    "logitech", "razer", "corsair", "kingston", "sandisk", "western digital", "seagate",
    "nvidia", "intel", "amd", "canon", "nikon", "fujifilm", "olympus", "gopro", "dji",
];

const APPAREL_BRANDS: &[&str] = &[
    "nike", "adidas", "puma", "reebok", "new balance", "converse", "vans", "under armour",
    "columbia", "the north face", "patagonia", "arc'teryx", "uniqlo", "zara", "h&m", "gap",
    "levi's", "levis", "wrangler", "calvin klein", "ralph lauren", "polo", "tommy hilfiger",
    "lacoste", "burberry", "gucci", "prada", "louis vuitton", "chanel", "hermes", "dior",
    "balenciaga", "givenchy", "versace", "armani", "coach", "michael kors", "kate spade",
    "tory burch", "supreme", "stussy", "champion", "fila", "asics", "mizuno", "skechers",
    "crocs", "birkenstock", "timberland", "dr. martens", "ugg",
];

const COSMETICS_BRANDS: &[&str] = &[
    "shiseido", "sk-ii", "lancome", "estee lauder", "clinique", "mac", "nars", "bobbi brown",
    "tom ford", "ysl", "maybelline", "loreal", "revlon", "covergirl", "neutrogena", "olay",
    "kiehl's", "lush", "the body shop", "innisfree", "etude", "sulwhasoo", "laneige",
];

const WATCH_BRANDS: &[&str] = &[
    "citizen", "seiko", "casio", "g-shock", "orient", "grand seiko", "rolex", "omega",
    "tag heuer", "breitling", "longines", "tissot", "hamilton", "swatch", "tudor", "cartier",
    "patek philippe", "audemars piguet", "iwc", "panerai", "hublot", "jaeger-lecoultre",
    "vacheron constantin", "zenith", "movado", "bulova", "timex", "fossil", "garmin", "fitbit",
    "suunto", "luminox",
];

/// Apparel brands whose catalogue is mostly shoes.
const FOOTWEAR_PRIMARY_BRANDS: &[&str] = &[
    "nike", "adidas", "puma", "reebok", "new balance", "converse", "vans", "asics", "mizuno",
    "skechers", "crocs", "under armour", "birkenstock", "timberland", "dr. martens", "ugg",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrandMatch<'a> {
    pub token: &'a str,
    pub chapter: Chapter,
}

/// Brand token to chapter lookup. Each token maps to exactly one chapter.
#[derive(Clone, Debug, Default)]
pub struct BrandDirectory {
    by_token: BTreeMap<String, Chapter>,
    detection_order: Vec<String>,
    footwear_primary: BTreeSet<String>,
}

impl BrandDirectory {
    /// Later groups win when a token is listed twice.
    pub fn from_groups(groups: &[(Chapter, &[&str])], footwear_primary: &[&str]) -> Self {
        let mut by_token = BTreeMap::new();
        for (chapter, tokens) in groups {
            for token in tokens.iter() {
                by_token.insert(token.trim().to_lowercase(), *chapter);
            }
        }

        let mut detection_order: Vec<String> = by_token.keys().cloned().collect();
        detection_order.sort_by_key(|token| (Reverse(token.chars().count()), token.clone()));

        Self {
            by_token,
            detection_order,
            footwear_primary: footwear_primary.iter().map(|token| token.to_lowercase()).collect(),
        }
    }

    pub fn standard() -> Self {
        Self::from_groups(
            &[
                (Chapter::AUTOMOTIVE, AUTOMOTIVE_BRANDS),
                (Chapter::ELECTRONICS, ELECTRONICS_BRANDS),
                (Chapter::APPAREL_KNIT, APPAREL_BRANDS),
                (Chapter::COSMETICS, COSMETICS_BRANDS),
                (Chapter::WATCHES, WATCH_BRANDS),
            ],
            FOOTWEAR_PRIMARY_BRANDS,
        )
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }

    /// Exact lookup of a normalized brand name, e.g. a marketplace `Brand` attribute.
    pub fn chapter_of(&self, brand: &str) -> Option<Chapter> {
        self.by_token.get(brand.trim().to_lowercase().as_str()).copied()
    }

    /// First brand mentioned in `text_lower`, trying longer tokens before shorter ones.
    pub fn detect(&self, text_lower: &str) -> Option<BrandMatch<'_>> {
        self.detection_order
            .iter()
            .find(|token| contains_term(text_lower, token))
            .and_then(|token| {
                self.by_token
                    .get(token)
                    .map(|chapter| BrandMatch { token: token.as_str(), chapter: *chapter })
            })
    }

    /// Every brand mentioned in `text_lower`, in detection order.
    pub fn mentions<'a>(&'a self, text_lower: &'a str) -> impl Iterator<Item = BrandMatch<'a>> + 'a {
        self.detection_order.iter().filter(move |token| contains_term(text_lower, token)).filter_map(
            move |token| {
                self.by_token
                    .get(token)
                    .map(|chapter| BrandMatch { token: token.as_str(), chapter: *chapter })
            },
        )
    }

    pub fn is_footwear_primary(&self, token: &str) -> bool {
        self.footwear_primary.contains(token)
    }

    /// Tokens mapped to `chapter`, alphabetically.
    pub fn subset(&self, chapter: Chapter) -> Vec<&str> {
        self.by_token
            .iter()
            .filter(|(_, mapped)| **mapped == chapter)
            .map(|(token, _)| token.as_str())
            .collect()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(token) = self.by_token.keys().find(|token| token.trim().is_empty()) {
            return Err(DomainError::InvariantViolation(format!("blank brand token `{token}`")));
        }
        for token in &self.footwear_primary {
            if self.chapter_of(token) != Some(Chapter::APPAREL_KNIT) {
                return Err(DomainError::InvariantViolation(format!(
                    "footwear brand `{token}` is not registered as an apparel brand"
                )));
            }
        }
        Ok(())
    }
}
