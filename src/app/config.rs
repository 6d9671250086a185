use crate::app::cli::Cli;
use crate::app::models::{OutputEntry, RuntimeConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Project root used when neither the CLI nor the config file names one.
pub const DEFAULT_BASE_DIR: &str = "/tmp/proj";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ScaffoldFile {
    base_dir: Option<PathBuf>,
    #[serde(default)]
    files: Vec<ExtraFile>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ExtraFile {
    path: PathBuf,
    content: String,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("tsconfig_scaffold")
            .join("scaffold.toml")
    })
}

/// Reads the config file. A missing default file is fine, a missing explicit one is not.
fn load_scaffold_file(explicit: Option<&Path>) -> Result<ScaffoldFile> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(ScaffoldFile::default()),
        },
    };

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;
    log::debug!("Loaded config from {}", config_path.display());

    parse_scaffold_file(&content)
        .context(format!("Failed to parse {}", config_path.display()))
}

fn parse_scaffold_file(content: &str) -> Result<ScaffoldFile> {
    Ok(toml::from_str(content)?)
}

pub fn resolve_config(cli: &Cli) -> Result<RuntimeConfig> {
    let file = load_scaffold_file(cli.config.as_deref())?;
    Ok(merge(cli, file))
}

// Base directory: CLI flag > config file > built-in default
fn merge(cli: &Cli, file: ScaffoldFile) -> RuntimeConfig {
    let base_dir = cli
        .base_dir
        .clone()
        .or(file.base_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR));

    let extra_files = file
        .files
        .into_iter()
        .map(|f| OutputEntry::new(f.path, f.content))
        .collect();

    RuntimeConfig {
        base_dir,
        extra_files,
    }
}
