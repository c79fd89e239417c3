//! `palette-forge.toml` handling.
//!
//! ```toml
//! [extract]
//! color_count = 8
//! max_edge = 200
//!
//! [export]
//! format = "css"
//! include_comments = true
//! file_stem = "palette-tokens"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use forge_image::{ExtractOptions, DEFAULT_COLOR_COUNT, DEFAULT_MAX_EDGE};
use forge_tokens::{ExportFormat, DEFAULT_FILE_STEM};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "palette-forge.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub extract: ExtractConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    pub color_count: usize,
    pub max_edge: u32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            color_count: DEFAULT_COLOR_COUNT,
            max_edge: DEFAULT_MAX_EDGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub include_comments: bool,
    pub file_stem: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Css,
            include_comments: true,
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }
}

impl Config {
    /// Load an explicitly named config file, or `palette-forge.toml` in the
    /// working directory when it exists. Only a missing explicit file is an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_path(path)
                } else {
                    log::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.extract.max_edge == 0 {
            bail!("extract.max_edge must be at least 1");
        }
        if self.export.file_stem.trim().is_empty() {
            bail!("export.file_stem must not be empty");
        }
        Ok(())
    }

    /// Extraction options with an optional `--count` override applied.
    pub fn extract_options(&self, count: Option<usize>) -> ExtractOptions {
        ExtractOptions {
            color_count: count.unwrap_or(self.extract.color_count),
            max_edge: self.extract.max_edge,
        }
    }
}
