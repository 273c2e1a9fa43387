use std::sync::Arc;

use tariffy_core::classify::ContextDetector;
use tariffy_core::{
    ClassificationEngine, Classifier, ConfidenceLevel, Corpus, DomainError, ProductInput,
    TariffSchedule,
};

const WRISTWATCH_PATH: &str =
    "Jewelry & Watches > Watches, Parts & Accessories > Watches > Wristwatches";

#[test]
fn knit_cotton_tee_is_high_confidence_6109() {
    let engine = ClassificationEngine::standard();
    let ranked = engine.classify(&ProductInput::new("Men's Cotton T-Shirt")).expect("ranked");

    assert_eq!(ranked[0].hs6, "6109.10");
    assert_eq!(ranked[0].chapter, "Chapter 61");
    assert_eq!(ranked[0].confidence, ConfidenceLevel::High);
}

#[test]
fn phone_case_listing_follows_the_leaf_category() {
    let engine = ClassificationEngine::standard();
    let product = ProductInput::new("iPhone case")
        .with_attribute("Type", "phone case")
        .with_category_path("Cell Phones & Accessories > Cell Phone Cases, Covers & Skins");
    let ranked = engine.classify(&product).expect("ranked");

    let top = &ranked[0];
    assert_eq!(top.hs6, "4202.99");
    assert_eq!(top.confidence, ConfidenceLevel::High);
    assert!(top.reason.starts_with('['), "resolver justification should lead: {}", top.reason);
    assert!(ranked.iter().all(|candidate| candidate.chapter != "Chapter 71"));
}

#[test]
fn wristwatch_path_beats_conflicting_keywords() {
    let engine = ClassificationEngine::standard();
    let product = ProductInput::new("Leather bracelet").with_category_path(WRISTWATCH_PATH);
    let ranked = engine.classify(&product).expect("ranked");

    assert_eq!(ranked[0].chapter, "Chapter 91");
    assert_eq!(ranked[0].confidence, ConfidenceLevel::High);
}

#[test]
fn land_rover_is_read_as_one_brand() {
    let corpus = Corpus::standard();
    let weights = tariffy_core::classify::DEFAULT_WEIGHTS;
    let ctx = ContextDetector::new(&corpus, &weights).detect("Land Rover parts");
    assert_eq!(ctx.brand.as_deref(), Some("land rover"));

    let ranked =
        ClassificationEngine::standard().classify(&ProductInput::new("Land Rover parts")).expect("ranked");
    assert_eq!(ranked[0].chapter, "Chapter 87");
}

#[test]
fn short_keyword_needs_a_word_boundary() {
    let engine = ClassificationEngine::standard();
    let ranked = engine.classify(&ProductInput::new("captivating design")).expect("ranked");
    assert!(ranked.iter().all(|candidate| candidate.chapter != "Chapter 65"));
}

#[test]
fn unknown_widget_yields_only_the_sentinel() {
    let engine = ClassificationEngine::standard();
    let ranked = engine.classify(&ProductInput::new("xyz123 unknown widget")).expect("ranked");

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].chapter, "N/A");
    assert_eq!(ranked[0].confidence, ConfidenceLevel::Low);
}

#[test]
fn blank_product_is_refused_rather_than_ranked() {
    let engine = ClassificationEngine::standard();
    let outcome = engine.classify(&ProductInput::new("  ").with_description(""));
    assert_eq!(outcome, Err(DomainError::EmptyProduct));
}

#[test]
fn repeated_classification_is_identical() {
    let engine = ClassificationEngine::standard();
    let product = ProductInput::new("Seiko leather strap watch")
        .with_description("stainless steel case, leather band")
        .with_attribute("Brand", "Seiko")
        .with_attribute("Movement", "Automatic");

    let first = engine.classify(&product).expect("ranked");
    for _ in 0..5 {
        assert_eq!(engine.classify(&product).expect("ranked"), first);
    }
}

#[test]
fn results_never_exceed_three_and_codes_are_unique() {
    let engine = ClassificationEngine::standard();
    let ranked = engine
        .classify(&ProductInput::new("cotton t-shirt hoodie sweater jacket shirt dress"))
        .expect("ranked");

    assert!((1..=3).contains(&ranked.len()));
    let mut codes: Vec<_> = ranked.iter().map(|candidate| candidate.hs6.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), ranked.len());
}

#[test]
fn injected_corpus_is_used_instead_of_the_shared_one() {
    let schedule = TariffSchedule::from_json_str(
        r#"{"Chapter 91": [{"code": "9102.11", "description": "Wrist-watches, mechanical display"}]}"#,
    )
    .expect("schedule parses");
    let corpus = Arc::new(Corpus::standard().with_schedule(schedule));
    let classifier = Classifier::new(ClassificationEngine::new(corpus));

    let request = classifier.arbitration_request(
        &ProductInput::new("Casio digital watch").with_category_path(WRISTWATCH_PATH),
    );
    assert!(request.allows("9102.11"));
    assert!(request.reference_codes.iter().any(|code| code.code == "9102.11"));
}

#[tokio::test]
async fn rules_answer_when_no_arbitrator_is_configured() {
    let classifier = Classifier::new(ClassificationEngine::standard());
    let outcome = classifier
        .classify(&ProductInput::new("Men's Cotton T-Shirt"))
        .await
        .expect("classified");

    assert_eq!(outcome.source, tariffy_core::ClassificationSource::Rules);
    assert_eq!(outcome.candidates[0].hs6, "6109.10");
}
