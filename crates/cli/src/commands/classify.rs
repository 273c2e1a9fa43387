use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tariffy_agent::LlmArbitrator;
use tariffy_core::config::AppConfig;
use tariffy_core::history::HistorySink;
use tariffy_core::{
    ApplicationError, Classification, ClassificationEngine, Classifier, Corpus, HistoryRecord,
    ProductInput, ProductText, StaticTextProvider, TariffSchedule, TextProvider,
};
use tariffy_db::{connect_with_config, migrations, SqlHistoryRepository};
use tracing::warn;

use crate::commands::{load_config, runtime, CommandResult};

#[derive(Clone, Debug, Default)]
pub struct ClassifyArgs {
    pub name: String,
    pub description: String,
    pub attributes: Vec<(String, String)>,
    pub category: String,
    /// Listing URL or similar; stored as the history record's reference.
    pub reference: String,
    pub json: bool,
    pub save: bool,
}

impl ClassifyArgs {
    pub fn product(&self) -> ProductInput {
        let mut product = ProductInput::new(self.name.clone())
            .with_description(self.description.clone())
            .with_category_path(self.category.clone());
        for (key, value) in &self.attributes {
            product = product.with_attribute(key.clone(), value.clone());
        }
        product
    }

    /// The same product as provider text, for the text classification path.
    pub fn text(&self) -> ProductText {
        ProductText {
            title: self.name.clone(),
            description: self.description.clone(),
            attributes: self.attributes.iter().cloned().collect(),
            category_path: self.category.clone(),
            error: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ClassifyReport<'a> {
    #[serde(flatten)]
    classification: &'a Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    history_id: Option<String>,
}

/// Corpus (plus the configured schedule) and, when enabled, the LLM arbitrator.
/// An enabled arbitrator without an API key is still installed; it reports
/// itself unavailable and classification falls back to the rules.
pub fn build_classifier(config: &AppConfig) -> anyhow::Result<Classifier> {
    let mut corpus = Corpus::standard();
    if let Some(path) = &config.corpus.schedule_path {
        let schedule = TariffSchedule::load(path)
            .with_context(|| format!("loading tariff schedule `{}`", path.display()))?;
        corpus = corpus.with_schedule(schedule);
    }
    corpus.validate().context("validating classification corpus")?;

    let mut classifier = Classifier::new(ClassificationEngine::new(Arc::new(corpus)));
    if config.arbitrator.enabled {
        classifier =
            classifier.with_arbitrator(Arc::new(LlmArbitrator::from_config(&config.arbitrator)));
    }
    Ok(classifier)
}

pub fn run(args: ClassifyArgs) -> CommandResult {
    let config = match load_config("classify") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let classifier = match build_classifier(&config) {
        Ok(classifier) => classifier,
        Err(error) => {
            return CommandResult::failure("classify", "classifier_init", format!("{error:#}"), 7);
        }
    };
    let runtime = match runtime("classify") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let provider = StaticTextProvider::new(args.text());
    let text = runtime.block_on(provider.fetch(&args.reference));
    let product_name = text.title.clone();
    let classification = match runtime.block_on(classifier.classify_text(text)) {
        Ok(classification) => classification,
        Err(error) => {
            let interface = ApplicationError::from(error).into_interface("cli");
            return CommandResult::failure(
                "classify",
                "invalid_input",
                interface.user_message(),
                6,
            );
        }
    };

    let mut history_id = None;
    let mut save_note = None;
    if args.save {
        let record = HistoryRecord::new(
            args.reference.clone(),
            product_name,
            classification.candidates.clone(),
        );
        let id = record.id.to_string();
        match runtime.block_on(save_record(&config, record)) {
            Ok(()) => history_id = Some(id),
            Err(error) => {
                warn!(event_name = "history.record.failed", error = %error, "history save failed");
                save_note = Some(format!("history not saved: {error}"));
            }
        }
    }

    if args.json {
        let message = save_note.unwrap_or_else(|| format!("classified via {}", classification.source));
        let report = ClassifyReport { classification: &classification, history_id };
        return CommandResult::success_with("classify", message, &report);
    }

    let mut output = render_human(&classification);
    if let Some(id) = history_id {
        output.push_str(&format!("\nsaved to history as {id}"));
    }
    if let Some(note) = save_note {
        output.push_str(&format!("\n{note}"));
    }
    CommandResult::text(output)
}

async fn save_record(config: &AppConfig, record: HistoryRecord) -> Result<(), ApplicationError> {
    let pool = connect_with_config(&config.database)
        .await
        .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
    migrations::run_pending(&pool)
        .await
        .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
    let outcome = SqlHistoryRepository::new(pool.clone()).save(record).await;
    pool.close().await;
    outcome
}

fn render_human(classification: &Classification) -> String {
    let mut lines = vec![format!("source: {}", classification.source)];
    for (index, candidate) in classification.candidates.iter().enumerate() {
        lines.push(format!(
            "{}. {}  HTS {}  JP {}  {}  [{}]",
            index + 1,
            candidate.hs6,
            candidate.hts10,
            candidate.jp_hs9,
            candidate.chapter,
            candidate.confidence
        ));
        lines.push(format!("   {} ({}); {}", candidate.category, candidate.material, candidate.usage));
        lines.push(format!("   {}", candidate.reason));
    }
    for note in &classification.notes {
        lines.push(format!("note: {note}"));
    }
    lines.join("\n")
}
