use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG: &str = "fitshdr.toml";

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Input patterns used when -i is not given.
    #[serde(default)]
    pub input: Option<Vec<String>>,
    /// Grouping keywords used when no search tokens are given.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl AppConfig {
    pub fn input_patterns(&self) -> Vec<String> {
        self.defaults
            .input
            .clone()
            .unwrap_or_else(|| vec!["*.json".to_string()])
    }

    pub fn group_keywords(&self) -> Vec<String> {
        self.defaults.keywords.clone().unwrap_or_default()
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&contents).map_err(|e| anyhow!("invalid config: {e}"))
}
