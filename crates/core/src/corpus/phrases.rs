use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chapter::Chapter;
use crate::errors::DomainError;

/// One reading of a polysemous keyword: if any of `co_words` appears near it,
/// the keyword points at `target`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseContextRule {
    pub co_words: Vec<String>,
    pub target: Chapter,
    pub base_boost: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhraseTable {
    entries: BTreeMap<String, Vec<PhraseContextRule>>,
}

impl PhraseTable {
    pub fn insert(&mut self, keyword: &str, target: Chapter, base_boost: f64, co_words: &[&str]) {
        self.entries.entry(keyword.to_lowercase()).or_default().push(PhraseContextRule {
            co_words: co_words.iter().map(|word| word.to_lowercase()).collect(),
            target,
            base_boost,
        });
    }

    pub fn readings(&self, keyword: &str) -> Option<&[PhraseContextRule]> {
        self.entries.get(keyword).map(Vec::as_slice)
    }

    pub fn is_polysemous(&self, keyword: &str) -> bool {
        self.entries.contains_key(keyword)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn standard() -> Self {
        let auto = Chapter::AUTOMOTIVE;
        let mut table = Self::default();

        table.insert(
            "cap",
            auto,
            5.0,
            &[
                "antenna", "plug", "block", "oil", "radiator", "valve", "filler", "gas", "fuel",
                "distributor", "rotor", "engine", "delete",
            ],
        );
        table.insert("cap", Chapter::PLASTICS, 3.0, &["bottle", "water", "drink", "lid"]);

        table.insert(
            "plug",
            auto,
            5.0,
            &[
                "spark", "engine", "ignition", "cylinder", "block", "oil", "drain", "antenna",
                "delete", "freeze",
            ],
        );
        table.insert(
            "plug",
            Chapter::ELECTRONICS,
            3.0,
            &["electric", "power", "outlet", "adapter", "socket", "usb"],
        );

        table.insert(
            "cover",
            auto,
            5.0,
            &["bumper", "fender", "engine", "valve", "timing", "rocker", "trunk", "hood", "door"],
        );
        table.insert(
            "cover",
            Chapter::LEATHER_GOODS,
            3.0,
            &["phone", "iphone", "tablet", "ipad", "smartphone"],
        );
        table.insert(
            "cover",
            Chapter::MADE_UP_TEXTILES,
            3.0,
            &["bed", "sofa", "cushion", "pillow", "seat"],
        );

        table.insert(
            "light",
            auto,
            5.0,
            &[
                "brake", "tail", "head", "fog", "turn", "signal", "dashboard", "marker", "reverse",
                "parking", "bumper",
            ],
        );
        table.insert(
            "light",
            Chapter::FURNITURE,
            3.0,
            &["desk", "table", "floor", "ceiling", "wall", "pendant", "chandelier"],
        );

        table.insert(
            "band",
            Chapter::WATCHES,
            4.0,
            &["watch", "wrist", "strap", "apple", "fitbit", "garmin", "silicon"],
        );
        table.insert(
            "band",
            Chapter::of(40),
            2.0,
            &["rubber", "elastic", "hair", "exercise", "resistance"],
        );

        table.insert(
            "case",
            Chapter::LEATHER_GOODS,
            4.0,
            &["phone", "iphone", "galaxy", "pixel", "smartphone", "tablet", "ipad", "airpods"],
        );
        table.insert(
            "case",
            Chapter::LEATHER_GOODS,
            3.0,
            &["gear", "tool", "gun", "rifle", "ammo", "pelican"],
        );
        table.insert(
            "case",
            auto,
            5.0,
            &["bumper", "transfer", "transmission", "differential", "timing", "chain"],
        );

        table.insert(
            "shell",
            auto,
            5.0,
            &["body", "fender", "bumper", "door", "quarter", "panel", "trunk"],
        );
        table.insert(
            "shell",
            Chapter::LEATHER_GOODS,
            3.0,
            &["phone", "iphone", "laptop", "macbook"],
        );

        table.insert(
            "plate",
            auto,
            5.0,
            &["license", "number", "skid", "armor", "mounting", "bracket", "pressure", "clutch"],
        );
        table.insert("plate", Chapter::of(69), 3.0, &["dinner", "ceramic", "porcelain", "china"]);

        table.insert(
            "ring",
            auto,
            5.0,
            &["piston", "seal", "o-ring", "snap", "retaining", "bearing", "gasket", "synchronizer"],
        );
        table.insert(
            "ring",
            Chapter::JEWELRY,
            3.0,
            &["jewelry", "diamond", "gold", "silver", "engagement", "wedding"],
        );

        table.insert(
            "mount",
            auto,
            5.0,
            &["engine", "motor", "transmission", "strut", "shock", "exhaust"],
        );
        table.insert(
            "mount",
            Chapter::ELECTRONICS,
            2.0,
            &["tv", "monitor", "wall", "tripod", "camera"],
        );

        table.insert(
            "brush",
            auto,
            5.0,
            &["carbon", "motor", "starter", "alternator", "generator", "dynamo"],
        );
        table.insert("brush", Chapter::of(96), 3.0, &["tooth", "hair", "paint", "makeup"]);

        table.insert(
            "mirror",
            auto,
            5.0,
            &["side", "rear", "view", "door", "wing", "blind spot", "towing"],
        );
        table.insert(
            "mirror",
            Chapter::of(70),
            2.0,
            &["bathroom", "wall", "vanity", "makeup", "compact"],
        );

        table.insert(
            "filter",
            auto,
            5.0,
            &["oil", "air", "fuel", "cabin", "transmission", "engine", "intake"],
        );
        table.insert(
            "filter",
            Chapter::MACHINERY,
            2.0,
            &["water", "coffee", "hepa", "vacuum"],
        );

        table.insert(
            "pump",
            auto,
            5.0,
            &["fuel", "water", "oil", "power steering", "brake", "coolant", "washer"],
        );
        table.insert(
            "pump",
            Chapter::MACHINERY,
            2.0,
            &["air", "bicycle", "pool", "aquarium"],
        );

        table.insert("pen", Chapter::of(96), 3.0, &["ball", "ballpoint", "fountain", "marker"]);

        table
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (keyword, readings) in &self.entries {
            if readings.is_empty() {
                return Err(DomainError::InvariantViolation(format!(
                    "polysemous keyword `{keyword}` has no readings"
                )));
            }
            for reading in readings {
                let boost_ok = reading.base_boost.is_finite() && reading.base_boost > 0.0;
                if reading.co_words.is_empty() || !boost_ok {
                    return Err(DomainError::InvariantViolation(format!(
                        "reading of `{keyword}` towards {} needs co-words and a positive boost",
                        reading.target
                    )));
                }
            }
        }
        Ok(())
    }
}
