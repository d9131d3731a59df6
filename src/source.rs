use std::path::Path;

use anyhow::{Context, Result};

use crate::leaf::LeafRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<SourceFormat> {
        match path.extension()?.to_str()? {
            "json" => Some(SourceFormat::Json),
            "yml" | "yaml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }
}

/// Read an array of leaf records from a `.json`, `.yml` or `.yaml` file.
pub fn load_leaves(path: &Path) -> Result<Vec<LeafRecord>> {
    let Some(format) = SourceFormat::from_path(path) else {
        anyhow::bail!("unsupported leaf file (expected .json, .yml or .yaml): {}", path.display());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    leaves_from_str(&contents, format).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn leaves_from_str(text: &str, format: SourceFormat) -> Result<Vec<LeafRecord>> {
    let records = match format {
        SourceFormat::Json => serde_json::from_str(text)?,
        SourceFormat::Yaml => serde_yml::from_str(text)?,
    };
    Ok(records)
}
