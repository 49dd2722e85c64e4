//! Extraction configuration.
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.

use serde::Deserialize;

use crate::validate::MIN_TITLE_ROWS;

/// Errors that can occur while loading an [`ExtractionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tunables for the extraction engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum number of rows a caption table must have. Values below 4 are
    /// raised to 4, since rows 1 through 3 always carry the periods.
    pub min_title_rows: usize,
    /// Fall back to the page's paragraph captions when a caption table names
    /// no single statement.
    pub caption_fallback: bool,
    /// Unit label to emit when a caption table has no `(단위 : …)` row.
    pub unknown_unit: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_title_rows: MIN_TITLE_ROWS,
            caption_fallback: false,
            unknown_unit: None,
        }
    }
}

/// Parses an [`ExtractionConfig`] from a TOML document.
///
/// # Errors
///
/// Returns [`ConfigError::Toml`] if the document is malformed or a field has
/// the wrong type.
pub fn parse_config_toml(toml_str: &str) -> Result<ExtractionConfig, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}
