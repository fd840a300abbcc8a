//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use signal_codegen::GeneratorConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// Schema file (JSON or CSV); `--schema` takes precedence
    pub schema: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory receiving the generated files; `--target` takes precedence
    pub target_dir: Option<PathBuf>,
}

/// Load configuration from a TOML file
///
/// Relative paths in `[input]` and `[output]` are resolved against the
/// directory holding the config file.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if let Some(base) = path.parent() {
        config.input.schema = config.input.schema.map(|p| base.join(p));
        config.output.target_dir = config.output.target_dir.map(|p| base.join(p));
    }

    Ok(config)
}
