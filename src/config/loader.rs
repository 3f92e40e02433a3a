//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `MULTISPLIT_MAX_FILES=16`.
pub const ENV_PREFIX: &str = "MULTISPLIT_";

/// Section name honoured when the settings live inside a larger file.
const SECTION: &str = "multisplit";

const CANDIDATES: &[&str] = &[
    "multisplit.toml",
    ".multisplit.toml",
    "multisplit.yml",
    ".multisplit.yml",
    "multisplit.yaml",
    ".multisplit.yaml",
];

/// Load defaults, then the config file, then `MULTISPLIT_*` environment overrides.
///
/// An explicitly requested file must parse. An auto-discovered file that does
/// not parse is reported and replaced by the defaults.
pub fn load_config(workspace_root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let file_config = load_file_config(workspace_root, config_path)?;
    apply_env(file_config, ENV_PREFIX)
}

fn load_file_config(workspace_root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(workspace_root),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Parse TOML config, supporting a nested `[multisplit]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `multisplit:` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn apply_env(config: Config, prefix: &str) -> Result<Config> {
    Figment::from(Serialized::defaults(config))
        .merge(Env::prefixed(prefix))
        .extract()
        .with_context(|| format!("Invalid {}* environment override", prefix))
}

fn discover_config(workspace_root: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| workspace_root.join(candidate)).find(|path| path.exists())
}
