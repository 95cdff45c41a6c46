use crate::digest::digestion::DigestionParameters;
use crate::errors::{FlyerMapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_batch_size() -> usize {
    32
}

/// Knobs for one run of the pipeline.
///
/// Batch size only bounds how many encoded peptides are handed to the
/// classifier at once; it does not change results.
///
/// ```
/// use flyermap::config::PipelineConfig;
/// let config: PipelineConfig =
///     serde_json::from_str(r#"{"digestion": {"min_length": 7}}"#).unwrap();
/// assert_eq!(config.digestion.min_length, 7);
/// assert_eq!(config.digestion.max_length, 40);
/// assert_eq!(config.batch_size, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub digestion: DigestionParameters,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            digestion: DigestionParameters::default(),
            batch_size: default_batch_size(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(FlyerMapError::InvalidConfig(
                "batch_size must be at least 1".into(),
            ));
        }
        self.digestion.validate()
    }
}
