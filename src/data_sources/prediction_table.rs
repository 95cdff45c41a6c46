use crate::classifier::DetectabilityClassifier;
use crate::encoding::peptide_encoder::EncodedPeptide;
use crate::errors::{ClassifierError, FlyerMapError, Result};
use crate::models::{ClassProbabilities, NUM_CLASSES};
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path;

/// Classifier backed by precomputed model outputs.
///
/// Each entry maps a peptide sequence to its four class probabilities, as
/// exported from an inference run. Lookups decode the encoded peptide, so the
/// table answers exactly what a live model would have been asked.
#[derive(Debug, Clone, Default)]
pub struct PredictionTable {
    entries: HashMap<String, ClassProbabilities>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PredictionEntry {
    sequence: String,
    probabilities: [f32; NUM_CLASSES],
}

impl PredictionTable {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, [f32; NUM_CLASSES])>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(seq, probs)| (seq.into().to_ascii_uppercase(), probs.into()))
                .collect(),
        }
    }

    /// Parses a JSON array of `{"sequence": .., "probabilities": [..4]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<PredictionEntry> = serde_json::from_str(json)?;
        Ok(Self::from_parsed(entries))
    }

    /// Same entries as [`PredictionTable::from_json`], one object per line.
    pub fn from_ndjson(json: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (line_num, line) in json.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let elem: PredictionEntry = serde_json::from_str(line).map_err(|e| {
                error!("Error parsing line {}: {:?}", line_num + 1, line);
                e
            })?;
            entries.push(elem);
        }
        Ok(Self::from_parsed(entries))
    }

    /// Picks the parser from the extension: `.ndjson`/`.jsonl` or plain JSON.
    pub fn from_file(path: &path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let out = match path.extension().and_then(|x| x.to_str()) {
            Some("ndjson") | Some("jsonl") => Self::from_ndjson(&json)?,
            _ => Self::from_json(&json)?,
        };
        info!("Loaded {} predictions from {:?}", out.len(), path);
        Ok(out)
    }

    fn from_parsed(entries: Vec<PredictionEntry>) -> Self {
        Self::from_entries(entries.into_iter().map(|x| (x.sequence, x.probabilities)))
    }

    pub fn get(&self, sequence: &str) -> Option<&ClassProbabilities> {
        self.entries.get(sequence)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DetectabilityClassifier for PredictionTable {
    fn predict_batch(
        &self,
        batch: &[EncodedPeptide],
    ) -> std::result::Result<Vec<ClassProbabilities>, ClassifierError> {
        batch
            .iter()
            .map(|encoded| {
                let sequence = encoded.decode().ok_or_else(|| {
                    FlyerMapError::MalformedInput(format!(
                        "Undecodable peptide codes: {:?}",
                        encoded.codes()
                    ))
                })?;
                self.get(&sequence)
                    .copied()
                    .ok_or(FlyerMapError::UnknownPeptide(sequence))
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|e| Box::new(e) as ClassifierError)
    }
}
