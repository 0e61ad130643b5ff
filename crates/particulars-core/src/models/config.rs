//! Configuration structures for statement processing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ParticularsError, Result};

/// Main configuration for the particulars tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticularsConfig {
    /// Statement input configuration.
    pub input: InputConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,
}

/// How statement CSV files are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Header of the column holding the narration.
    pub narration_column: String,

    /// Field delimiter.
    pub delimiter: char,

    /// Whether the first row is a header row.
    pub has_headers: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            narration_column: "particulars".to_string(),
            delimiter: ',',
            has_headers: true,
        }
    }
}

/// Output format written by the tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    #[default]
    Json,
    Csv,
    Text,
}

/// How results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Header of the column the resolved depositor is written to.
    pub depositor_column: String,

    /// Default output format.
    pub format: OutputKind,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            depositor_column: "depositor".to_string(),
            format: OutputKind::Json,
            pretty: false,
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of worker threads (0 = one per CPU).
    pub jobs: usize,

    /// Keep going when a file fails.
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: 4,
            continue_on_error: false,
        }
    }
}

impl ParticularsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.input.narration_column.trim().is_empty() {
            return Err(ParticularsError::Config(
                "input.narration_column must not be empty".to_string(),
            ));
        }
        if self.output.depositor_column.trim().is_empty() {
            return Err(ParticularsError::Config(
                "output.depositor_column must not be empty".to_string(),
            ));
        }
        if !self.input.delimiter.is_ascii() {
            return Err(ParticularsError::Config(format!(
                "input.delimiter must be an ASCII character, got {:?}",
                self.input.delimiter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ParticularsConfig::default();
        assert_eq!(config.input.narration_column, "particulars");
        assert_eq!(config.output.depositor_column, "depositor");
        assert_eq!(config.output.format, OutputKind::Json);
        assert_eq!(config.batch.jobs, 4);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ParticularsConfig =
            serde_json::from_str(r#"{"input": {"delimiter": ";"}, "output": {"format": "csv"}}"#)
                .unwrap();
        assert_eq!(config.input.delimiter, ';');
        assert_eq!(config.input.narration_column, "particulars");
        assert_eq!(config.output.format, OutputKind::Csv);
        assert!(!config.batch.continue_on_error);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ParticularsConfig::default();
        config.output.pretty = true;
        config.batch.jobs = 2;
        config.save(&path).unwrap();

        let loaded = ParticularsConfig::from_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_blank_columns() {
        let mut config = ParticularsConfig::default();
        config.input.narration_column = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ParticularsError::Config(_))
        ));
    }
}
