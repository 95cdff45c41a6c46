use crate::encoding::peptide_encoder::ENCODED_LENGTH;
use crate::errors::{FlyerMapError, Result};
use crate::models::Peptide;
use log::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::LazyLock;
use std::time::Instant;

static TRYPSIN_SITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[KR]").expect("trypsin site regex is valid"));

/// Cleavage happens right after every `regex` match, except when the next
/// residue is `skip_suffix`.
#[derive(Debug, Clone)]
pub struct DigestionPattern {
    pub regex: &'static Regex,
    pub skip_suffix: Option<char>,
}

impl DigestionPattern {
    pub fn trypsin() -> Self {
        DigestionPattern {
            regex: &TRYPSIN_SITE,
            skip_suffix: Some('P'),
        }
    }

    /// Sorted, deduplicated cut offsets, always including `0` and the length.
    pub fn boundaries(&self, sequence: &str) -> Vec<usize> {
        let mut out = vec![0];
        for mat in self.regex.find_iter(sequence) {
            let right = mat.end();
            if let Some(skip) = self.skip_suffix {
                if right < sequence.len() && sequence[right..].starts_with(skip) {
                    continue;
                }
            }
            if right > *out.last().unwrap_or(&0) {
                out.push(right);
            }
        }
        if *out.last().unwrap_or(&0) < sequence.len() {
            out.push(sequence.len());
        }
        out
    }

    /// Fully cleaved segments, in order, partitioning the sequence.
    pub fn cleavage_sites(&self, sequence: &str) -> Vec<Range<usize>> {
        self.boundaries(sequence)
            .windows(2)
            .map(|w| w[0]..w[1])
            .collect()
    }
}

fn default_min_length() -> usize {
    6
}

fn default_max_length() -> usize {
    40
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestionParameters {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default)]
    pub max_missed_cleavages: usize,
}

impl Default for DigestionParameters {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            max_missed_cleavages: 0,
        }
    }
}

impl DigestionParameters {
    pub fn validate(&self) -> Result<()> {
        if self.min_length > self.max_length {
            return Err(FlyerMapError::InvalidConfig(format!(
                "min_length ({}) is larger than max_length ({})",
                self.min_length, self.max_length
            )));
        }
        if self.max_length > ENCODED_LENGTH {
            return Err(FlyerMapError::InvalidConfig(format!(
                "max_length ({}) exceeds the encoder width ({})",
                self.max_length, ENCODED_LENGTH
            )));
        }
        Ok(())
    }

    /// Tryptic peptides of `sequence`, ascending by start (then end).
    ///
    /// Each peptide spans `1..=max_missed_cleavages + 1` consecutive segments.
    /// Peptides outside `[min_length, max_length]` are dropped. Repeated
    /// sequences at different offsets are all kept.
    pub fn digest(&self, sequence: &str) -> Vec<Peptide> {
        let st = Instant::now();
        let sites = DigestionPattern::trypsin().cleavage_sites(sequence);
        let num_sites = sites.len();
        let out: Vec<Peptide> = (0..num_sites)
            .flat_map(|i| {
                let start = sites[i].start;
                let max_j = self.max_missed_cleavages.min(num_sites - i - 1);
                (0..=max_j)
                    .filter_map(|j| {
                        let end = sites[i + j].end;
                        let span = end - start;

                        if span < self.min_length || span > self.max_length {
                            return None;
                        }
                        Some(Peptide::from_parent(sequence, start..end))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        debug!(
            "Digested {} residues into {} segments and {} peptides in {:?}",
            sequence.len(),
            num_sites,
            out.len(),
            st.elapsed()
        );
        out
    }
}
