use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_yml::Value;

use crate::tree::DEFAULT_DELIMITER;

pub const CONFIG_FILE: &str = ".fieldtree.yml";
pub const DEFAULT_FORMAT: &str = "text";

/// Resolved configuration from `.fieldtree.yml`.
#[derive(Debug, Default)]
pub struct ResolvedConfig {
    delimiter: Option<String>,
    format: Option<String>,
    /// Keys this version does not interpret, kept verbatim.
    options: HashMap<String, Value>,
}

/// Load config from the given path, or look for `.fieldtree.yml` in the
/// current directory. Returns an empty config if the file doesn't exist.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => Path::new(CONFIG_FILE).to_path_buf(),
    };

    if !config_path.exists() {
        return Ok(ResolvedConfig::default());
    }

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let raw: Value = serde_yml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;

    let mut config = ResolvedConfig::default();
    if let Value::Mapping(map) = &raw {
        for (key, value) in map {
            let Some(key_str) = key.as_str() else {
                continue;
            };
            match key_str {
                "delimiter" => {
                    let delimiter = value
                        .as_str()
                        .filter(|d| !d.is_empty())
                        .with_context(|| {
                            format!("`delimiter` must be a non-empty string in {}", config_path.display())
                        })?;
                    config.delimiter = Some(delimiter.to_string());
                }
                "format" => {
                    if let Some(format) = value.as_str() {
                        config.format = Some(format.to_string());
                    }
                }
                _ => {
                    config.options.insert(key_str.to_string(), value.clone());
                }
            }
        }
    }

    Ok(config)
}

impl ResolvedConfig {
    /// Segment delimiter for leaf names.
    pub fn delimiter(&self) -> &str {
        self.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER)
    }

    /// Default output format when none is given on the command line.
    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}
