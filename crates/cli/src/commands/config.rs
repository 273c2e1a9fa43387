use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tariffy_core::config::{AppConfig, CONFIG_FILE_CANDIDATES};
use toml::Value;

use crate::commands::{load_config, CommandResult};

pub fn run() -> CommandResult {
    let config = match load_config("config") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    CommandResult::text(render(&config))
}

pub fn render(config: &AppConfig) -> String {
    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let arbitrator = &config.arbitrator;
    let api_key = if arbitrator.api_key().is_some() { "<redacted>" } else { "<unset>" };
    let schedule_path = config
        .corpus
        .schedule_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<unset>".to_string());

    let entries: Vec<(&str, String, &[&str])> = vec![
        ("database.url", config.database.url.clone(), &["TARIFFY_DATABASE_URL"]),
        (
            "database.max_connections",
            config.database.max_connections.to_string(),
            &["TARIFFY_DATABASE_MAX_CONNECTIONS"],
        ),
        (
            "database.timeout_secs",
            config.database.timeout_secs.to_string(),
            &["TARIFFY_DATABASE_TIMEOUT_SECS"],
        ),
        ("arbitrator.enabled", arbitrator.enabled.to_string(), &["TARIFFY_ARBITRATOR_ENABLED"]),
        (
            "arbitrator.provider",
            format!("{:?}", arbitrator.provider),
            &["TARIFFY_ARBITRATOR_PROVIDER"],
        ),
        (
            "arbitrator.api_key",
            api_key.to_string(),
            &["TARIFFY_ARBITRATOR_API_KEY", "ANTHROPIC_API_KEY"],
        ),
        ("arbitrator.base_url", arbitrator.base_url.clone(), &["TARIFFY_ARBITRATOR_BASE_URL"]),
        ("arbitrator.model", arbitrator.model.clone(), &["TARIFFY_ARBITRATOR_MODEL"]),
        (
            "arbitrator.timeout_secs",
            arbitrator.timeout_secs.to_string(),
            &["TARIFFY_ARBITRATOR_TIMEOUT_SECS"],
        ),
        (
            "arbitrator.max_tokens",
            arbitrator.max_tokens.to_string(),
            &["TARIFFY_ARBITRATOR_MAX_TOKENS"],
        ),
        ("corpus.schedule_path", schedule_path, &["TARIFFY_CORPUS_SCHEDULE_PATH"]),
        (
            "logging.level",
            config.logging.level.clone(),
            &["TARIFFY_LOGGING_LEVEL", "TARIFFY_LOG_LEVEL"],
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            &["TARIFFY_LOGGING_FORMAT", "TARIFFY_LOG_FORMAT"],
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(
        entries
            .into_iter()
            .map(|(key, value, env_keys)| render_line(key, &value, source(key, env_keys))),
    );
    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    CONFIG_FILE_CANDIDATES.iter().map(|name| PathBuf::from(*name)).find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    let set_env = env_keys
        .iter()
        .find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = set_env {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use super::contains_path;

    #[test]
    fn dotted_paths_resolve_into_nested_tables() {
        let doc: toml::Value = "[arbitrator]\nmodel = \"m\"\n".parse().expect("toml");
        assert!(contains_path(&doc, "arbitrator.model"));
        assert!(!contains_path(&doc, "arbitrator.api_key"));
        assert!(!contains_path(&doc, "logging.level"));
    }
}
