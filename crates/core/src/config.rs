use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ARBITRATOR_MODEL: &str = "claude-haiku-4-5-20251001";
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["tariffy.toml", "config/tariffy.toml"];

const MAX_TIMEOUT_SECS: u64 = 300;

static INTERPOLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}$]*)\}").expect("interpolation pattern is valid"));

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub arbitrator: ArbitratorConfig,
    pub corpus: CorpusConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

/// Settings for the optional LLM arbitrator. Disabled unless switched on;
/// a key on its own never enables it.
#[derive(Clone, Debug)]
pub struct ArbitratorConfig {
    pub enabled: bool,
    pub provider: ArbitratorProvider,
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

#[derive(Clone, Debug, Default)]
pub struct CorpusConfig {
    /// JSON tariff schedule that widens the arbitrator's reference codes.
    pub schedule_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArbitratorProvider {
    Anthropic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Programmatic settings applied after the file and the environment.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub arbitrator_enabled: Option<bool>,
    pub arbitrator_model: Option<String>,
    pub schedule_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Explicit file; otherwise the first of [`CONFIG_FILE_CANDIDATES`] that exists.
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("`{path}` is not valid config TOML: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("config file `{0}` does not exist")]
    MissingConfigFile(PathBuf),
    #[error("config file references `${{{var}}}` but it is not set")]
    MissingEnvInterpolation { var: String },
    #[error("config file has a `${{` without a closing `}}`")]
    UnterminatedInterpolation,
    #[error("`{key}` has an unusable value `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://tariffy.db".to_string(),
                max_connections: 5,
                timeout_secs: 30,
            },
            arbitrator: ArbitratorConfig {
                enabled: false,
                provider: ArbitratorProvider::Anthropic,
                api_key: None,
                base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
                model: DEFAULT_ARBITRATOR_MODEL.to_string(),
                timeout_secs: 30,
                max_tokens: 1024,
            },
            corpus: CorpusConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl FromStr for ArbitratorProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            other => Err(ConfigError::Validation(format!(
                "arbitrator.provider `{other}` is not supported; use `anthropic`"
            ))),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "logging.format `{other}` is not one of compact, pretty or json"
            ))),
        }
    }
}

impl ArbitratorConfig {
    /// The key, if one is configured and not blank.
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref().filter(|key| !key.expose_secret().trim().is_empty())
    }
}

impl AppConfig {
    /// Defaults, then the config file, then `TARIFFY_*` variables, then
    /// `options.overrides`; the result is validated before it is returned.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let LoadOptions { config_path, require_file, overrides } = options;

        let file_patch = match locate_file(config_path.as_deref()) {
            Some(path) => read_file_patch(&path)?,
            None if require_file => {
                let expected =
                    config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));
                return Err(ConfigError::MissingConfigFile(expected));
            }
            None => ConfigPatch::default(),
        };

        let mut config = Self::default();
        for patch in [file_patch, ConfigPatch::from_env()?, ConfigPatch::from(overrides)] {
            config.merge(patch);
        }
        config.validate()?;
        Ok(config)
    }

    fn merge(&mut self, patch: ConfigPatch) {
        let ConfigPatch { database, arbitrator, corpus, logging } = patch;

        let db = &mut self.database;
        replace(&mut db.url, database.url);
        replace(&mut db.max_connections, database.max_connections);
        replace(&mut db.timeout_secs, database.timeout_secs);

        let arb = &mut self.arbitrator;
        replace(&mut arb.enabled, arbitrator.enabled);
        replace(&mut arb.provider, arbitrator.provider);
        if let Some(key) = arbitrator.api_key {
            arb.api_key = Some(SecretString::from(key));
        }
        replace(&mut arb.base_url, arbitrator.base_url);
        replace(&mut arb.model, arbitrator.model);
        replace(&mut arb.timeout_secs, arbitrator.timeout_secs);
        replace(&mut arb.max_tokens, arbitrator.max_tokens);

        if corpus.schedule_path.is_some() {
            self.corpus.schedule_path = corpus.schedule_path;
        }

        replace(&mut self.logging.level, logging.level);
        replace(&mut self.logging.format, logging.format);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let db = &self.database;
        let url = db.url.trim();
        require(
            url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:",
            "database.url must be `sqlite://<path>`, `sqlite::memory:` or `:memory:`",
        )?;
        require(db.max_connections > 0, "database.max_connections must be at least 1")?;
        require(
            (1..=MAX_TIMEOUT_SECS).contains(&db.timeout_secs),
            "database.timeout_secs must be between 1 and 300",
        )?;

        let arb = &self.arbitrator;
        require(
            (1..=MAX_TIMEOUT_SECS).contains(&arb.timeout_secs),
            "arbitrator.timeout_secs must be between 1 and 300",
        )?;
        require(arb.max_tokens > 0, "arbitrator.max_tokens must be at least 1")?;
        let base_url = arb.base_url.trim();
        require(
            base_url.starts_with("https://") || base_url.starts_with("http://"),
            "arbitrator.base_url must be an http(s) URL",
        )?;

        let schedule_set = self.corpus.schedule_path.as_ref();
        require(
            schedule_set.map_or(true, |path| !path.as_os_str().is_empty()),
            "corpus.schedule_path is set but empty",
        )?;

        require(
            matches!(
                self.logging.level.trim().to_ascii_lowercase().as_str(),
                "trace" | "debug" | "info" | "warn" | "error"
            ),
            "logging.level must be trace, debug, info, warn or error",
        )
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn require(condition: bool, message: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Validation(message.to_string()))
    }
}

fn locate_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => path.exists().then(|| path.to_path_buf()),
        None => CONFIG_FILE_CANDIDATES
            .iter()
            .map(|name| PathBuf::from(*name))
            .find(|path| path.exists()),
    }
}

fn read_file_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    let expanded = expand_env(&raw)?;
    toml::from_str(&expanded)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

/// Replaces every `${NAME}` with the variable's value.
fn expand_env(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;

    for captures in INTERPOLATION.captures_iter(input) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let literal = &input[cursor..whole.start()];
        if literal.contains("${") {
            return Err(ConfigError::UnterminatedInterpolation);
        }
        output.push_str(literal);
        let value = env::var(name.as_str())
            .map_err(|_| ConfigError::MissingEnvInterpolation { var: name.as_str().to_string() })?;
        output.push_str(&value);
        cursor = whole.end();
    }

    let rest = &input[cursor..];
    if rest.contains("${") {
        return Err(ConfigError::UnterminatedInterpolation);
    }
    output.push_str(rest);
    Ok(output)
}

/// First non-blank variable among `keys`.
fn env_value(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| env::var(key).ok().filter(|value| !value.trim().is_empty()))
}

fn env_parsed<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    env_value(&[key])
        .map(|value| {
            value.trim().to_ascii_lowercase().parse::<T>().map_err(|_| {
                ConfigError::InvalidEnvOverride { key: key.to_string(), value }
            })
        })
        .transpose()
}

/// One layer of settings; `None` leaves the lower layer's value in place.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigPatch {
    database: DatabasePatch,
    arbitrator: ArbitratorPatch,
    corpus: CorpusPatch,
    logging: LoggingPatch,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DatabasePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArbitratorPatch {
    enabled: Option<bool>,
    provider: Option<ArbitratorProvider>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CorpusPatch {
    schedule_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl ConfigPatch {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabasePatch {
                url: env_value(&["TARIFFY_DATABASE_URL"]),
                max_connections: env_parsed("TARIFFY_DATABASE_MAX_CONNECTIONS")?,
                timeout_secs: env_parsed("TARIFFY_DATABASE_TIMEOUT_SECS")?,
            },
            arbitrator: ArbitratorPatch {
                enabled: env_parsed("TARIFFY_ARBITRATOR_ENABLED")?,
                provider: env_value(&["TARIFFY_ARBITRATOR_PROVIDER"])
                    .map(|value| value.parse())
                    .transpose()?,
                api_key: env_value(&["TARIFFY_ARBITRATOR_API_KEY", "ANTHROPIC_API_KEY"]),
                base_url: env_value(&["TARIFFY_ARBITRATOR_BASE_URL"]),
                model: env_value(&["TARIFFY_ARBITRATOR_MODEL"]),
                timeout_secs: env_parsed("TARIFFY_ARBITRATOR_TIMEOUT_SECS")?,
                max_tokens: env_parsed("TARIFFY_ARBITRATOR_MAX_TOKENS")?,
            },
            corpus: CorpusPatch {
                schedule_path: env_value(&["TARIFFY_CORPUS_SCHEDULE_PATH"]).map(PathBuf::from),
            },
            logging: LoggingPatch {
                level: env_value(&["TARIFFY_LOGGING_LEVEL", "TARIFFY_LOG_LEVEL"]),
                format: env_value(&["TARIFFY_LOGGING_FORMAT", "TARIFFY_LOG_FORMAT"])
                    .map(|value| value.parse())
                    .transpose()?,
            },
        })
    }
}

impl From<ConfigOverrides> for ConfigPatch {
    fn from(overrides: ConfigOverrides) -> Self {
        Self {
            database: DatabasePatch { url: overrides.database_url, ..DatabasePatch::default() },
            arbitrator: ArbitratorPatch {
                enabled: overrides.arbitrator_enabled,
                model: overrides.arbitrator_model,
                ..ArbitratorPatch::default()
            },
            corpus: CorpusPatch { schedule_path: overrides.schedule_path },
            logging: LoggingPatch { level: overrides.log_level, format: overrides.log_format },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::{Mutex, MutexGuard};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{expand_env, AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const TOUCHED: [&str; 10] = [
        "TARIFFY_DATABASE_URL",
        "TARIFFY_ARBITRATOR_ENABLED",
        "TARIFFY_ARBITRATOR_API_KEY",
        "ANTHROPIC_API_KEY",
        "TARIFFY_ARBITRATOR_MODEL",
        "TARIFFY_ARBITRATOR_TIMEOUT_SECS",
        "TARIFFY_LOG_LEVEL",
        "TARIFFY_LOG_FORMAT",
        "TEST_TARIFFY_KEY",
        "TEST_TARIFFY_UNSET",
    ];

    /// Holds the env lock with the touched variables cleared; clears them
    /// again on drop.
    struct ScopedEnv {
        _lock: MutexGuard<'static, ()>,
    }

    impl ScopedEnv {
        fn with(vars: &[(&str, &str)]) -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            TOUCHED.iter().for_each(|key| env::remove_var(key));
            for (key, value) in vars {
                env::set_var(key, value);
            }
            Self { _lock: lock }
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            TOUCHED.iter().for_each(|key| env::remove_var(key));
        }
    }

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("tariffy.toml");
        fs::write(&path, body).expect("config file written");
        path
    }

    fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
        AppConfig::load(LoadOptions {
            config_path: Some(path.to_path_buf()),
            ..LoadOptions::default()
        })
    }

    #[test]
    fn file_values_can_come_from_the_environment() {
        let _env = ScopedEnv::with(&[("TEST_TARIFFY_KEY", "sk-from-env")]);
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(
            &dir,
            "[arbitrator]\nenabled = true\napi_key = \"${TEST_TARIFFY_KEY}\"\n",
        );

        let config = load_from(&path).expect("config loads");

        assert!(config.arbitrator.enabled);
        let key = config.arbitrator.api_key().map(|key| key.expose_secret().to_owned());
        assert_eq!(key.as_deref(), Some("sk-from-env"));
    }

    #[test]
    fn unset_interpolation_variable_is_named() {
        let _env = ScopedEnv::with(&[]);
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "[database]\nurl = \"${TEST_TARIFFY_UNSET}\"\n");

        match load_from(&path) {
            Err(ConfigError::MissingEnvInterpolation { var }) => {
                assert_eq!(var, "TEST_TARIFFY_UNSET");
            }
            other => panic!("expected missing interpolation, got {other:?}"),
        }
    }

    #[test]
    fn dangling_interpolation_is_rejected() {
        let _env = ScopedEnv::with(&[("TEST_TARIFFY_KEY", "x")]);
        assert!(matches!(
            expand_env("a = \"${TEST_TARIFFY_KEY\""),
            Err(ConfigError::UnterminatedInterpolation)
        ));
        assert!(matches!(
            expand_env("a = \"${TEST_TARIFFY_KEY}${\""),
            Err(ConfigError::UnterminatedInterpolation)
        ));
        let expanded = expand_env("a = \"$HOME ${TEST_TARIFFY_KEY}\"").ok();
        assert_eq!(expanded.as_deref(), Some("a = \"$HOME x\""));
    }

    #[test]
    fn short_logging_aliases_apply() {
        let _env =
            ScopedEnv::with(&[("TARIFFY_LOG_LEVEL", "warn"), ("TARIFFY_LOG_FORMAT", "JSON")]);

        let config = AppConfig::load(LoadOptions::default()).expect("config loads");

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn layers_apply_in_order_file_env_overrides() {
        let _env = ScopedEnv::with(&[
            ("TARIFFY_DATABASE_URL", "sqlite://from-env.db"),
            ("TARIFFY_ARBITRATOR_MODEL", "model-from-env"),
        ]);
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(
            &dir,
            r#"
[database]
url = "sqlite://from-file.db"
timeout_secs = 12

[arbitrator]
model = "model-from-file"

[corpus]
schedule_path = "data/hts.json"

[logging]
level = "warn"
"#,
        );

        let config = AppConfig::load(LoadOptions {
            config_path: Some(path),
            overrides: ConfigOverrides {
                database_url: Some("sqlite://from-override.db".to_string()),
                log_level: Some("debug".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("config loads");

        assert_eq!(config.database.url, "sqlite://from-override.db");
        assert_eq!(config.database.timeout_secs, 12);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.arbitrator.model, "model-from-env");
        assert_eq!(config.corpus.schedule_path, Some(PathBuf::from("data/hts.json")));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn enabled_arbitrator_without_a_key_still_loads() {
        let _env = ScopedEnv::with(&[("TARIFFY_ARBITRATOR_ENABLED", "true")]);

        let config = AppConfig::load(LoadOptions::default()).expect("config loads");
        assert!(config.arbitrator.enabled);
        assert!(config.arbitrator.api_key().is_none());
    }

    #[test]
    fn non_numeric_timeout_is_an_invalid_override() {
        let _env = ScopedEnv::with(&[("TARIFFY_ARBITRATOR_TIMEOUT_SECS", "soon")]);

        match AppConfig::load(LoadOptions::default()) {
            Err(ConfigError::InvalidEnvOverride { key, value }) => {
                assert_eq!(key, "TARIFFY_ARBITRATOR_TIMEOUT_SECS");
                assert_eq!(value, "soon");
            }
            other => panic!("expected invalid override, got {other:?}"),
        }
    }

    #[test]
    fn fallback_key_is_picked_up_but_never_printed() {
        let _env = ScopedEnv::with(&[("ANTHROPIC_API_KEY", "sk-ant-secret-value")]);

        let config = AppConfig::load(LoadOptions::default()).expect("config loads");

        assert!(config.arbitrator.api_key().is_some());
        assert!(!config.arbitrator.enabled);
        assert!(!format!("{config:?}").contains("sk-ant-secret-value"));
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn required_file_must_exist() {
        let _env = ScopedEnv::with(&[]);
        let missing = PathBuf::from("/nonexistent/tariffy.toml");

        let outcome = AppConfig::load(LoadOptions {
            config_path: Some(missing.clone()),
            require_file: true,
            ..LoadOptions::default()
        });

        assert!(matches!(outcome, Err(ConfigError::MissingConfigFile(path)) if path == missing));
    }
}
