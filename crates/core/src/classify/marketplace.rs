//! Chapter inference from marketplace taxonomy and item attributes, independent
//! of the free text.

use serde::Serialize;

use crate::corpus::taxonomy::{path_levels, TYPE_FIELDS, WATCH_MOVEMENTS};
use crate::corpus::Corpus;
use crate::domain::chapter::Chapter;
use crate::domain::product::ProductInput;

pub const LEAF_EXACT_CONFIDENCE: u8 = 100;
pub const LEAF_PARTIAL_CONFIDENCE: u8 = 90;
pub const ATTRIBUTE_TYPE_CONFIDENCE: u8 = 80;
pub const ANCESTOR_LEAF_CONFIDENCE: u8 = 70;
pub const ANCESTOR_PARENT_CONFIDENCE: u8 = 60;
pub const BRAND_BASE_CONFIDENCE: u8 = 40;
pub const MOVEMENT_SUPPORT: u8 = 10;
pub const MATERIAL_SUPPORT: u8 = 3;
pub const DEPARTMENT_SUPPORT: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverTier {
    LeafExact,
    LeafPartial,
    Ancestor,
    AttributeType,
    Brand,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketplaceVerdict {
    pub chapter: Chapter,
    /// 0 to 100.
    pub confidence: u8,
    pub justification: String,
    pub tier: ResolverTier,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StrategyOutcome {
    Match(MarketplaceVerdict),
    NoMatch,
}

impl StrategyOutcome {
    fn into_verdict(self) -> Option<MarketplaceVerdict> {
        match self {
            Self::Match(verdict) => Some(verdict),
            Self::NoMatch => None,
        }
    }
}

type Strategy = fn(&Corpus, &ResolverInput<'_>) -> StrategyOutcome;

/// Evaluated left to right; the first match wins.
const STRATEGIES: [Strategy; 5] = [leaf_exact, leaf_partial, ancestors, attribute_type, brand_support];

struct ResolverInput<'a> {
    product: &'a ProductInput,
    /// Lowercased path segments, deepest first.
    levels: Vec<String>,
    /// Deepest segment as written.
    leaf_display: &'a str,
}

#[derive(Clone, Copy, Debug)]
pub struct MarketplaceResolver<'a> {
    corpus: &'a Corpus,
}

impl<'a> MarketplaceResolver<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    pub fn resolve(&self, product: &ProductInput) -> Option<MarketplaceVerdict> {
        let input = ResolverInput {
            product,
            levels: path_levels(&product.category_path),
            leaf_display: product
                .category_path
                .rsplit('>')
                .map(str::trim)
                .find(|segment| !segment.is_empty())
                .unwrap_or_default(),
        };
        STRATEGIES.iter().find_map(|strategy| strategy(self.corpus, &input).into_verdict())
    }
}

fn leaf_exact(corpus: &Corpus, input: &ResolverInput<'_>) -> StrategyOutcome {
    let Some(leaf) = input.levels.first() else {
        return StrategyOutcome::NoMatch;
    };
    match corpus.taxonomy.leaf_exact(leaf) {
        Some(chapter) => StrategyOutcome::Match(MarketplaceVerdict {
            chapter,
            confidence: LEAF_EXACT_CONFIDENCE,
            justification: format!("marketplace leaf category: {} -> {chapter}", input.leaf_display),
            tier: ResolverTier::LeafExact,
        }),
        None => StrategyOutcome::NoMatch,
    }
}

fn leaf_partial(corpus: &Corpus, input: &ResolverInput<'_>) -> StrategyOutcome {
    let Some(leaf) = input.levels.first() else {
        return StrategyOutcome::NoMatch;
    };
    match corpus.taxonomy.leaf_partial(leaf) {
        Some((key, chapter)) => StrategyOutcome::Match(MarketplaceVerdict {
            chapter,
            confidence: LEAF_PARTIAL_CONFIDENCE,
            justification: format!(
                "marketplace leaf category (partial): {} ~ {key} -> {chapter}",
                input.leaf_display
            ),
            tier: ResolverTier::LeafPartial,
        }),
        None => StrategyOutcome::NoMatch,
    }
}

fn ancestors(corpus: &Corpus, input: &ResolverInput<'_>) -> StrategyOutcome {
    let taxonomy = &corpus.taxonomy;
    for level in input.levels.iter().skip(1) {
        if let Some(chapter) = taxonomy.leaf_exact(level) {
            return StrategyOutcome::Match(MarketplaceVerdict {
                chapter,
                confidence: ANCESTOR_LEAF_CONFIDENCE,
                justification: format!("marketplace category (ancestor): {level} -> {chapter}"),
                tier: ResolverTier::Ancestor,
            });
        }
        if let Some(chapter) = taxonomy.parent(level) {
            return StrategyOutcome::Match(MarketplaceVerdict {
                chapter,
                confidence: ANCESTOR_PARENT_CONFIDENCE,
                justification: format!("marketplace category (parent): {level} -> {chapter}"),
                tier: ResolverTier::Ancestor,
            });
        }
    }
    StrategyOutcome::NoMatch
}

fn attribute_type(corpus: &Corpus, input: &ResolverInput<'_>) -> StrategyOutcome {
    TYPE_FIELDS
        .iter()
        .find_map(|field| {
            let value = input.product.attribute(field)?;
            let chapter = corpus.taxonomy.item_type(value)?;
            Some(MarketplaceVerdict {
                chapter,
                confidence: ATTRIBUTE_TYPE_CONFIDENCE,
                justification: format!("item attribute {field}: {value} -> {chapter}"),
                tier: ResolverTier::AttributeType,
            })
        })
        .map_or(StrategyOutcome::NoMatch, StrategyOutcome::Match)
}

fn brand_support(corpus: &Corpus, input: &ResolverInput<'_>) -> StrategyOutcome {
    let product = input.product;
    let Some(brand) = product.attribute("Brand") else {
        return StrategyOutcome::NoMatch;
    };
    let Some(chapter) = corpus.brands.chapter_of(brand) else {
        return StrategyOutcome::NoMatch;
    };

    let mut confidence = BRAND_BASE_CONFIDENCE;
    let mut reasons = vec![format!("brand: {brand} -> {chapter}")];

    if let Some(movement) = product.attribute("Movement") {
        let recognized = WATCH_MOVEMENTS.contains(&movement.to_lowercase().as_str());
        if recognized && chapter == Chapter::WATCHES {
            confidence += MOVEMENT_SUPPORT;
            reasons.push(format!("movement: {movement}"));
        }
    }
    if let Some(material) = product.attribute("Material") {
        confidence += MATERIAL_SUPPORT;
        reasons.push(format!("material: {material}"));
    }
    if let Some(department) = product.attribute("Department") {
        confidence += DEPARTMENT_SUPPORT;
        reasons.push(format!("department: {department}"));
    }

    StrategyOutcome::Match(MarketplaceVerdict {
        chapter,
        confidence,
        justification: reasons.join(" / "),
        tier: ResolverTier::Brand,
    })
}

#[cfg(test)]
mod tests {
    use super::{MarketplaceResolver, ResolverTier};
    use crate::corpus::Corpus;
    use crate::domain::chapter::Chapter;
    use crate::domain::product::ProductInput;

    #[test]
    fn leaf_category_wins_over_conflicting_signals() {
        let corpus = Corpus::standard();
        let product = ProductInput::new("Nike running shoes phone case")
            .with_attribute("Brand", "Nike")
            .with_attribute("Type", "Sneakers")
            .with_category_path(
                "Jewelry & Watches > Watches, Parts & Accessories > Watches > Wristwatches",
            );
        let verdict = MarketplaceResolver::new(&corpus).resolve(&product).expect("verdict");
        assert_eq!(verdict.chapter, Chapter::WATCHES);
        assert_eq!(verdict.confidence, 100);
        assert_eq!(verdict.tier, ResolverTier::LeafExact);
        assert!(verdict.justification.contains("Wristwatches"));
    }

    #[test]
    fn partial_leaf_match_scores_ninety() {
        let corpus = Corpus::standard();
        let product = ProductInput::new("clock").with_category_path("Home & Garden > Vintage Wall Clocks");
        let verdict = MarketplaceResolver::new(&corpus).resolve(&product).expect("verdict");
        assert_eq!(verdict.tier, ResolverTier::LeafPartial);
        assert_eq!(verdict.confidence, 90);
        assert_eq!(verdict.chapter, Chapter::WATCHES);
    }

    #[test]
    fn compound_leaf_name_still_resolves_to_watches() {
        let corpus = Corpus::standard();
        let product = ProductInput::new("fitness tracker")
            .with_category_path("Jewelry & Watches > Smartwatches");
        let verdict = MarketplaceResolver::new(&corpus).resolve(&product).expect("verdict");
        assert_eq!(verdict.tier, ResolverTier::LeafPartial);
        assert_eq!(verdict.confidence, 90);
        assert_eq!(verdict.chapter, Chapter::WATCHES);
    }

    #[test]
    fn leaf_name_found_higher_up_the_path_scores_seventy() {
        let corpus = Corpus::standard();
        let product = ProductInput::new("widget").with_category_path("Watches > Zzz Qqq");
        let verdict = MarketplaceResolver::new(&corpus).resolve(&product).expect("verdict");
        assert_eq!(verdict.tier, ResolverTier::Ancestor);
        assert_eq!(verdict.confidence, 70);
        assert_eq!(verdict.chapter, Chapter::WATCHES);
        assert!(verdict.justification.contains("(ancestor): watches"));
    }

    #[test]
    fn ancestors_fall_back_to_parent_table() {
        let corpus = Corpus::standard();
        let product = ProductInput::new("widget").with_category_path("eBay Motors > Zzz Qqq");
        let verdict = MarketplaceResolver::new(&corpus).resolve(&product).expect("verdict");
        assert_eq!(verdict.tier, ResolverTier::Ancestor);
        assert_eq!(verdict.confidence, 60);
        assert_eq!(verdict.chapter, Chapter::AUTOMOTIVE);
    }

    #[test]
    fn attribute_type_is_used_without_a_path() {
        let corpus = Corpus::standard();
        let product = ProductInput::new("thing").with_attribute("Product Type", "Spark Plug");
        let verdict = MarketplaceResolver::new(&corpus).resolve(&product).expect("verdict");
        assert_eq!(verdict.tier, ResolverTier::AttributeType);
        assert_eq!(verdict.confidence, 80);
        assert_eq!(verdict.chapter, Chapter::AUTOMOTIVE);
    }

    #[test]
    fn brand_support_accumulates_corroborating_attributes() {
        let corpus = Corpus::standard();
        let product = ProductInput::new("diver")
            .with_attribute("Brand", "Seiko")
            .with_attribute("Movement", "Automatic")
            .with_attribute("Material", "Stainless Steel")
            .with_attribute("Department", "Men");
        let verdict = MarketplaceResolver::new(&corpus).resolve(&product).expect("verdict");
        assert_eq!(verdict.tier, ResolverTier::Brand);
        assert_eq!(verdict.confidence, 55);
        assert_eq!(
            verdict.justification,
            "brand: Seiko -> Chapter 91 / movement: Automatic / material: Stainless Steel / department: Men"
        );
    }

    #[test]
    fn movement_only_counts_for_watch_brands() {
        let corpus = Corpus::standard();
        let product = ProductInput::new("x").with_attribute("Brand", "Honda").with_attribute("Movement", "quartz");
        let verdict = MarketplaceResolver::new(&corpus).resolve(&product).expect("verdict");
        assert_eq!(verdict.confidence, 40);
    }

    #[test]
    fn nothing_matches_without_marketplace_data() {
        let corpus = Corpus::standard();
        let product = ProductInput::new("xyz123 unknown widget").with_attribute("Color", "Red");
        assert_eq!(MarketplaceResolver::new(&corpus).resolve(&product), None);
    }
}
