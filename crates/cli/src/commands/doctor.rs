use serde::Serialize;
use tariffy_core::config::{AppConfig, LoadOptions};
use tariffy_db::connect_with_config;

use crate::commands::classify::build_classifier;
use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct Check {
    name: &'static str,
    status: Status,
    details: String,
}

impl Check {
    fn from_result(name: &'static str, result: Result<String, String>) -> Self {
        match result {
            Ok(details) => Self { name, status: Status::Pass, details },
            Err(details) => Self { name, status: Status::Fail, details },
        }
    }

    fn skipped(name: &'static str) -> Self {
        Self { name, status: Status::Skipped, details: "configuration did not load".to_string() }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    overall_status: Status,
    checks: Vec<Check>,
}

/// Readiness checks: config, classifier wiring, database. Exit code 1 when
/// any check does not pass.
pub fn run(json_output: bool) -> CommandResult {
    let report = readiness_report();
    let exit_code = u8::from(report.overall_status != Status::Pass);

    let output = if json_output {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => json,
            Err(error) => {
                return CommandResult::failure("doctor", "serialization", error.to_string(), 1);
            }
        }
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn readiness_report() -> Report {
    let checks = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => vec![
            Check::from_result("config_validation", Ok("loaded and validated".to_string())),
            Check::from_result("classifier_readiness", classifier_readiness(&config)),
            Check::from_result("database_connectivity", database_connectivity(&config)),
        ],
        Err(error) => vec![
            Check::from_result("config_validation", Err(error.to_string())),
            Check::skipped("classifier_readiness"),
            Check::skipped("database_connectivity"),
        ],
    };

    let overall_status = if checks.iter().all(|check| check.status == Status::Pass) {
        Status::Pass
    } else {
        Status::Fail
    };
    Report { overall_status, checks }
}

fn classifier_readiness(config: &AppConfig) -> Result<String, String> {
    let classifier = build_classifier(config).map_err(|error| format!("{error:#}"))?;
    let corpus = classifier.engine().corpus();

    let schedule = match &corpus.schedule {
        Some(schedule) => format!(
            "{} schedule entries over {} chapters",
            schedule.entry_count(),
            schedule.chapter_count()
        ),
        None => "no schedule".to_string(),
    };
    let arbitrator = if classifier.has_arbitrator() && config.arbitrator.api_key().is_none() {
        format!("arbitrator {} (no api key; rules fallback)", config.arbitrator.model)
    } else if classifier.has_arbitrator() {
        format!("arbitrator {}", config.arbitrator.model)
    } else {
        "rules only".to_string()
    };
    Ok(format!("{} rules, {schedule}, {arbitrator}", corpus.rules.len()))
}

fn database_connectivity(config: &AppConfig) -> Result<String, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| format!("async runtime unavailable: {error}"))?;

    runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| format!("cannot open `{}`: {error}", config.database.url))?;
        pool.close().await;
        Ok(format!("opened `{}`", config.database.url))
    })
}

fn render_human(report: &Report) -> String {
    let headline = match report.overall_status {
        Status::Pass => "doctor: ready",
        _ => "doctor: not ready",
    };
    let mut lines = vec![headline.to_string()];
    lines.extend(report.checks.iter().map(|check| {
        let marker = match check.status {
            Status::Pass => "ok",
            Status::Fail => "fail",
            Status::Skipped => "skip",
        };
        format!("  [{marker:>4}] {}: {}", check.name, check.details)
    }));
    lines.join("\n")
}
