//! Configuration file parsing and layered resolution.
//!
//! Settings come from TOML files, `NH_*` environment variables, and caller
//! overrides, merged with fixed precedence (highest first):
//!
//! 1. Caller/CLI arguments
//! 2. Environment variables (`NH_*`)
//! 3. Local config file (`./.namehunt.toml`)
//! 4. Global config file (`~/.namehunt.toml`)
//! 5. XDG config file (`~/.config/namehunt/config.toml`)
//! 6. Built-in defaults

use crate::error::NameHuntError;
use crate::types::{Backend, RunConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for run options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Text-service settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmFileConfig>,
}

/// Default run option values from a config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Per-probe timeout as a string, e.g. "3s", "500ms", "1m"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// "doh" or "registrar"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doh_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorize: Option<bool>,
}

/// Text-service settings from a config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmFileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_size: Option<usize>,
}

/// Settings read from `NH_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub batch_size: Option<usize>,
    pub concurrency: Option<usize>,
    pub timeout: Option<String>,
    pub backend: Option<String>,
    pub doh_url: Option<String>,
    pub registrar_url: Option<String>,
    pub registrar_key: Option<String>,
    pub llm_url: Option<String>,
    pub llm_model: Option<String>,
    pub llm_key: Option<String>,
    pub categorize: Option<bool>,
}

/// Read `NH_*` environment variables, warning on unparseable values when
/// verbose.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    fn parse_var<T: std::str::FromStr>(name: &str, verbose: bool) -> Option<T> {
        let raw = env::var(name).ok()?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                if verbose {
                    eprintln!("Warning: ignoring unparseable {}={}", name, raw);
                }
                None
            }
        }
    }

    EnvConfig {
        batch_size: parse_var("NH_BATCH_SIZE", verbose),
        concurrency: parse_var("NH_CONCURRENCY", verbose),
        timeout: env::var("NH_TIMEOUT").ok(),
        backend: env::var("NH_BACKEND").ok(),
        doh_url: env::var("NH_DOH_URL").ok(),
        registrar_url: env::var("NH_REGISTRAR_URL").ok(),
        registrar_key: env::var("NH_REGISTRAR_KEY").ok(),
        llm_url: env::var("NH_LLM_URL").ok(),
        llm_model: env::var("NH_LLM_MODEL").ok(),
        llm_key: env::var("NH_LLM_KEY").ok(),
        categorize: parse_var("NH_CATEGORIZE", verbose),
    }
}

/// Configuration discovery and loading.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific TOML file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, NameHuntError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(NameHuntError::file_error(
                path.to_string_lossy(),
                "configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            NameHuntError::file_error(
                path.to_string_lossy(),
                format!("failed to read configuration file: {}", e),
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            NameHuntError::file_error(
                path.to_string_lossy(),
                format!("failed to parse configuration file: {}", e),
            )
        })
    }

    /// Discover config files in precedence order and merge them.
    ///
    /// Lower-precedence files are loaded first so later files win per-field.
    pub fn discover_and_load(&self) -> Result<FileConfig, NameHuntError> {
        let mut merged = FileConfig::default();
        let mut found_any = false;

        // Reverse precedence: XDG, then global, then local.
        for path in Self::discovery_paths().iter().rev() {
            if !path.exists() {
                continue;
            }
            match self.load_file(path) {
                Ok(file_config) => {
                    if self.verbose {
                        eprintln!("Loaded config from {}", path.display());
                    }
                    merged = merge_file_configs(merged, file_config);
                    found_any = true;
                }
                Err(e) if self.verbose => eprintln!("Warning: {}", e),
                Err(_) => {}
            }
        }

        if found_any {
            Ok(merged)
        } else {
            Err(NameHuntError::file_error(
                "(discovery)",
                "no configuration file found",
            ))
        }
    }

    fn discovery_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./.namehunt.toml")];

        if let Some(home) = env::var_os("HOME") {
            let home = PathBuf::from(home);
            paths.push(home.join(".namehunt.toml"));
            paths.push(home.join(".config").join("namehunt").join("config.toml"));
        }

        paths
    }
}

/// Overlay `update` on top of `base`, field by field.
fn merge_file_configs(base: FileConfig, update: FileConfig) -> FileConfig {
    fn merge_defaults(base: DefaultsConfig, update: DefaultsConfig) -> DefaultsConfig {
        DefaultsConfig {
            batch_size: update.batch_size.or(base.batch_size),
            concurrency: update.concurrency.or(base.concurrency),
            timeout: update.timeout.or(base.timeout),
            backend: update.backend.or(base.backend),
            doh_url: update.doh_url.or(base.doh_url),
            registrar_url: update.registrar_url.or(base.registrar_url),
            registrar_key: update.registrar_key.or(base.registrar_key),
            categorize: update.categorize.or(base.categorize),
        }
    }

    fn merge_llm(base: LlmFileConfig, update: LlmFileConfig) -> LlmFileConfig {
        LlmFileConfig {
            url: update.url.or(base.url),
            model: update.model.or(base.model),
            key: update.key.or(base.key),
            list_size: update.list_size.or(base.list_size),
        }
    }

    FileConfig {
        defaults: match (base.defaults, update.defaults) {
            (Some(b), Some(u)) => Some(merge_defaults(b, u)),
            (b, u) => u.or(b),
        },
        llm: match (base.llm, update.llm) {
            (Some(b), Some(u)) => Some(merge_llm(b, u)),
            (b, u) => u.or(b),
        },
    }
}

/// Apply a file config onto a run config.
pub(crate) fn apply_file_config(mut config: RunConfig, file_config: FileConfig) -> RunConfig {
    if let Some(defaults) = file_config.defaults {
        if let Some(batch_size) = defaults.batch_size {
            config.batch_size = batch_size.clamp(1, 100);
        }
        if let Some(concurrency) = defaults.concurrency {
            config.concurrency = concurrency.clamp(1, 100);
        }
        if let Some(timeout) = defaults.timeout.as_deref().and_then(|s| parse_duration(s).ok()) {
            config.probe_timeout = timeout;
        }
        if let Some(backend) = defaults.backend.as_deref().and_then(|s| s.parse().ok()) {
            config.backend = backend;
        }
        if let Some(doh_url) = defaults.doh_url {
            config.doh_endpoint = doh_url;
        }
        if let Some(registrar_url) = defaults.registrar_url {
            config.registrar_endpoint = Some(registrar_url);
        }
        if let Some(registrar_key) = defaults.registrar_key {
            config.registrar_key = Some(registrar_key);
        }
        if let Some(categorize) = defaults.categorize {
            config.categorize = categorize;
        }
    }

    if let Some(llm) = file_config.llm {
        if let Some(url) = llm.url {
            config.llm.endpoint = url;
        }
        if let Some(model) = llm.model {
            config.llm.model = model;
        }
        if let Some(key) = llm.key {
            config.llm.api_key = Some(key);
        }
        if let Some(list_size) = llm.list_size {
            config.llm.list_size = list_size.max(1);
        }
    }

    config
}

/// Apply environment variables onto a run config.
pub(crate) fn apply_env_config(mut config: RunConfig, env_config: EnvConfig) -> RunConfig {
    if let Some(batch_size) = env_config.batch_size {
        config.batch_size = batch_size.clamp(1, 100);
    }
    if let Some(concurrency) = env_config.concurrency {
        config.concurrency = concurrency.clamp(1, 100);
    }
    if let Some(timeout) = env_config.timeout.as_deref().and_then(|s| parse_duration(s).ok()) {
        config.probe_timeout = timeout;
    }
    if let Some(backend) = env_config.backend.as_deref().and_then(|s| s.parse::<Backend>().ok()) {
        config.backend = backend;
    }
    if let Some(doh_url) = env_config.doh_url {
        config.doh_endpoint = doh_url;
    }
    if let Some(registrar_url) = env_config.registrar_url {
        config.registrar_endpoint = Some(registrar_url);
    }
    if let Some(registrar_key) = env_config.registrar_key {
        config.registrar_key = Some(registrar_key);
    }
    if let Some(llm_url) = env_config.llm_url {
        config.llm.endpoint = llm_url;
    }
    if let Some(llm_model) = env_config.llm_model {
        config.llm.model = llm_model;
    }
    if let Some(llm_key) = env_config.llm_key {
        config.llm.api_key = Some(llm_key);
    }
    if let Some(categorize) = env_config.categorize {
        config.categorize = categorize;
    }

    config
}

/// Resolve a run config from defaults, config files, and environment.
///
/// `explicit_path` (from a `--config` flag or similar) bypasses discovery;
/// a load failure there is an error, while discovery failures fall back to
/// defaults silently.
pub fn resolve_config(explicit_path: Option<&str>, verbose: bool) -> Result<RunConfig, NameHuntError> {
    let mut config = RunConfig::default();
    let manager = ConfigManager::new(verbose);

    if let Some(path) = explicit_path {
        let file_config = manager.load_file(path)?;
        config = apply_file_config(config, file_config);
    } else if let Ok(file_config) = manager.discover_and_load() {
        config = apply_file_config(config, file_config);
    }

    Ok(apply_env_config(config, load_env_config(verbose)))
}

/// Parse a duration string like "3s", "500ms", "2m", or plain seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, NameHuntError> {
    let raw = raw.trim().to_lowercase();
    let invalid = || NameHuntError::config(format!("invalid duration '{}'", raw));

    if let Some(ms) = raw.strip_suffix("ms") {
        return ms
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| invalid());
    }
    if let Some(secs) = raw.strip_suffix('s') {
        return secs
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| invalid());
    }
    if let Some(mins) = raw.strip_suffix('m') {
        return mins
            .parse::<u64>()
            .map(|m| Duration::from_secs(m * 60))
            .map_err(|_| invalid());
    }

    // Assume seconds if no unit
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_duration_units() {
        assert_eq!(parse_duration("3s").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("7").unwrap(), Duration::from_secs(7));
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[defaults]\nbatch_size = 25\ntimeout = \"5s\"\nbackend = \"doh\"\n\n[llm]\nmodel = \"local-model\""
        )
        .unwrap();

        let manager = ConfigManager::new(false);
        let file_config = manager.load_file(file.path()).unwrap();
        let config = apply_file_config(RunConfig::default(), file_config);

        assert_eq!(config.batch_size, 25);
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
        assert_eq!(config.llm.model, "local-model");
    }

    #[test]
    fn missing_file_is_an_error() {
        let manager = ConfigManager::new(false);
        let err = manager.load_file("/nonexistent/.namehunt.toml").unwrap_err();
        assert!(matches!(err, NameHuntError::File { .. }));
    }

    #[test]
    fn file_values_are_clamped() {
        let file_config = FileConfig {
            defaults: Some(DefaultsConfig {
                batch_size: Some(10_000),
                concurrency: Some(0),
                ..DefaultsConfig::default()
            }),
            llm: None,
        };
        let config = apply_file_config(RunConfig::default(), file_config);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn later_file_wins_per_field() {
        let base = FileConfig {
            defaults: Some(DefaultsConfig {
                batch_size: Some(10),
                concurrency: Some(5),
                ..DefaultsConfig::default()
            }),
            llm: None,
        };
        let update = FileConfig {
            defaults: Some(DefaultsConfig {
                batch_size: Some(50),
                ..DefaultsConfig::default()
            }),
            llm: None,
        };

        let merged = merge_file_configs(base, update);
        let defaults = merged.defaults.unwrap();
        assert_eq!(defaults.batch_size, Some(50));
        assert_eq!(defaults.concurrency, Some(5));
    }
}
