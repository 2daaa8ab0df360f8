//! Layered configuration
//!
//! Built-in defaults, then `~/.citrus-console/citrus-console.json`, then either
//! `./citrus-console.json` or the file given with `--config`, then CLI flags
//! (which carry their `CITRUS_CONSOLE_*` env fallbacks through clap).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_BODY_LIMIT, DEFAULT_HOST, DEFAULT_MAX_CLAUSES,
    DEFAULT_MAX_EXPRESSION_LENGTH, DEFAULT_PORT,
};

/// Copy `value` into `slot` when it is set
fn take_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// `server` section of a config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerLayer {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// `filters` section of a config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FiltersLayer {
    pub max_expression_length: Option<usize>,
    pub max_clauses: Option<usize>,
}

/// One JSON config file; every field optional so files can be stacked
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub server: ServerLayer,
    pub filters: FiltersLayer,
    pub debug: Option<bool>,
    #[serde(flatten)]
    unknown: serde_json::Map<String, serde_json::Value>,
}

impl ConfigLayer {
    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        let layer: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in config file {}", path.display()))?;

        if !layer.unknown.is_empty() {
            let keys: Vec<&str> = layer.unknown.keys().map(String::as_str).collect();
            tracing::warn!(
                file = %path.display(),
                keys = %keys.join(", "),
                "Ignoring unknown config keys"
            );
        }
        Ok(layer)
    }

    /// Stack `top` over `self`; set values in `top` win
    fn stack(&mut self, top: ConfigLayer) {
        take_some(&mut self.server.host, top.server.host);
        take_some(&mut self.server.port, top.server.port);
        take_some(
            &mut self.filters.max_expression_length,
            top.filters.max_expression_length,
        );
        take_some(&mut self.filters.max_clauses, top.filters.max_clauses);
        take_some(&mut self.debug, top.debug);
    }
}

/// HTTP bind address
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Header filter limits enforced by the API
#[derive(Debug, Clone)]
pub struct FiltersConfig {
    pub max_expression_length: usize,
    pub max_clauses: usize,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
            max_clauses: DEFAULT_MAX_CLAUSES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub filters: FiltersConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Read every config file that applies, stack them and apply CLI overrides
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut merged = ConfigLayer::default();
        for path in config_files(cli)? {
            tracing::debug!(file = %path.display(), "Reading config file");
            merged.stack(ConfigLayer::read(&path)?);
        }
        Self::resolve(merged, cli)
    }

    fn resolve(file: ConfigLayer, cli: &CliConfig) -> Result<Self> {
        let config = Self {
            server: ServerConfig {
                host: cli
                    .host
                    .clone()
                    .or(file.server.host)
                    .unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: cli.port.or(file.server.port).unwrap_or(DEFAULT_PORT),
            },
            filters: FiltersConfig {
                max_expression_length: cli
                    .max_expression_length
                    .or(file.filters.max_expression_length)
                    .unwrap_or(DEFAULT_MAX_EXPRESSION_LENGTH),
                max_clauses: cli
                    .max_clauses
                    .or(file.filters.max_clauses)
                    .unwrap_or(DEFAULT_MAX_CLAUSES),
            },
            // --debug can only switch debug on
            debug: cli.debug || file.debug.unwrap_or(false),
        };
        config.check()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            max_expression_length = config.filters.max_expression_length,
            max_clauses = config.filters.max_clauses,
            debug = config.debug,
            "Configuration resolved"
        );
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        ensure!(!self.server.host.is_empty(), "server.host is empty");
        ensure!(self.server.port != 0, "server.port must be between 1 and 65535");
        ensure!(
            self.filters.max_expression_length > 0,
            "filters.max_expression_length must be at least 1"
        );
        ensure!(
            self.filters.max_clauses > 0,
            "filters.max_clauses must be at least 1"
        );

        if self.filters.max_expression_length > DEFAULT_BODY_LIMIT {
            tracing::warn!(
                max_expression_length = self.filters.max_expression_length,
                body_limit = DEFAULT_BODY_LIMIT,
                "Expression limit is above the request body limit"
            );
        }
        if is_all_interfaces(&self.server.host) {
            tracing::warn!(
                host = %self.server.host,
                "Console API is reachable from the network and has no authentication"
            );
        }
        Ok(())
    }
}

/// Config files to read, lowest precedence first
fn config_files(cli: &CliConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if let Some(home) = dirs::home_dir() {
        let profile = home.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME);
        if profile.is_file() {
            files.push(profile);
        }
    }

    match &cli.config {
        Some(path) => {
            let path = expand_path(&path.to_string_lossy());
            ensure!(path.is_file(), "Config file not found: {}", path.display());
            files.push(path);
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.is_file() {
                files.push(local);
            }
        }
    }

    Ok(files)
}

/// Wildcard bind addresses
pub(crate) fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(json: &str) -> ConfigLayer {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_layer_sections_are_optional() {
        let empty = layer("{}");
        assert!(empty.server.host.is_none());
        assert!(empty.filters.max_clauses.is_none());
        assert!(empty.debug.is_none());

        let partial = layer(r#"{ "filters": { "max_clauses": 12 } }"#);
        assert_eq!(partial.filters.max_clauses, Some(12));
        assert!(partial.filters.max_expression_length.is_none());
    }

    #[test]
    fn test_layer_collects_unknown_keys() {
        let parsed = layer(r#"{ "filter": { "max_clauses": 1 }, "debug": true }"#);
        assert!(parsed.unknown.contains_key("filter"));
        assert_eq!(parsed.debug, Some(true));
        assert!(parsed.filters.max_clauses.is_none());
    }

    #[test]
    fn test_stack_keeps_unset_values() {
        let mut base = layer(
            r#"{
                "server": { "host": "10.0.0.5", "port": 1000 },
                "filters": { "max_clauses": 5 }
            }"#,
        );
        base.stack(layer(r#"{ "server": { "port": 2000 }, "debug": true }"#));

        assert_eq!(base.server.host.as_deref(), Some("10.0.0.5"));
        assert_eq!(base.server.port, Some(2000));
        assert_eq!(base.filters.max_clauses, Some(5));
        assert_eq!(base.debug, Some(true));
    }

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(ConfigLayer::default(), &CliConfig::default()).unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(
            config.filters.max_expression_length,
            DEFAULT_MAX_EXPRESSION_LENGTH
        );
        assert_eq!(config.filters.max_clauses, DEFAULT_MAX_CLAUSES);
        assert!(!config.debug);
    }

    #[test]
    fn test_resolve_cli_beats_file() {
        let file = layer(
            r#"{
                "server": { "host": "file.local", "port": 7000 },
                "filters": { "max_clauses": 3 }
            }"#,
        );
        let cli = CliConfig {
            port: Some(3000),
            max_expression_length: Some(256),
            debug: true,
            ..Default::default()
        };
        let config = AppConfig::resolve(file, &cli).unwrap();

        assert_eq!(config.server.host, "file.local");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.filters.max_expression_length, 256);
        assert_eq!(config.filters.max_clauses, 3);
        assert!(config.debug);
    }

    #[test]
    fn test_resolve_rejects_unusable_values() {
        let cases = [
            CliConfig {
                port: Some(0),
                ..Default::default()
            },
            CliConfig {
                host: Some(String::new()),
                ..Default::default()
            },
            CliConfig {
                max_clauses: Some(0),
                ..Default::default()
            },
            CliConfig {
                max_expression_length: Some(0),
                ..Default::default()
            },
        ];
        for cli in &cases {
            assert!(
                AppConfig::resolve(ConfigLayer::default(), cli).is_err(),
                "accepted {cli:?}"
            );
        }
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.json");
        fs::write(
            &path,
            r#"{ "server": { "port": 9100 }, "filters": { "max_clauses": 7 } }"#,
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(path),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.filters.max_clauses, 7);
    }

    #[test]
    fn test_load_fails_on_missing_explicit_file() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/citrus-console.json")),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_fails_on_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ server: ").unwrap();

        let cli = CliConfig {
            config: Some(path),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_wildcard_hosts() {
        for host in ["0.0.0.0", "::", "[::]"] {
            assert!(is_all_interfaces(host));
        }
        for host in ["127.0.0.1", "localhost", "192.168.1.4"] {
            assert!(!is_all_interfaces(host));
        }
    }
}
