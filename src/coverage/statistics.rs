use super::coverage_map::CoverageMap;
use crate::models::{count_unique_sequences, DetectabilityClass, PredictionResult, NUM_CLASSES};
use serde::Serialize;

/// Peptide counts per class, `[NonFlyer, Weak, Intermediate, Strong]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub non_flyer: usize,
    pub weak: usize,
    pub intermediate: usize,
    pub strong: usize,
}

impl ClassCounts {
    pub fn add(&mut self, class: DetectabilityClass) {
        match class {
            DetectabilityClass::NonFlyer => self.non_flyer += 1,
            DetectabilityClass::Weak => self.weak += 1,
            DetectabilityClass::Intermediate => self.intermediate += 1,
            DetectabilityClass::Strong => self.strong += 1,
        }
    }

    pub fn get(&self, class: DetectabilityClass) -> usize {
        match class {
            DetectabilityClass::NonFlyer => self.non_flyer,
            DetectabilityClass::Weak => self.weak,
            DetectabilityClass::Intermediate => self.intermediate,
            DetectabilityClass::Strong => self.strong,
        }
    }

    pub fn as_array(&self) -> [usize; NUM_CLASSES] {
        DetectabilityClass::ALL.map(|x| self.get(x))
    }
}

/// Aggregate figures for one protein.
///
/// Class counts are per peptide, each peptide counted once however much it
/// overlaps others. Coverage figures are per position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub protein_length: usize,
    pub total_peptides: usize,
    pub unique_peptides: usize,
    pub flyer_count: usize,
    pub non_flyer_count: usize,
    pub per_class_counts: ClassCounts,
    pub flyer_percentage: f64,
    pub coverage_percent: f64,
    pub flyer_coverage_percent: f64,
    pub non_flyer_coverage_percent: f64,
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

impl SummaryStatistics {
    pub fn compute(
        protein_length: usize,
        predictions: &[PredictionResult],
        coverage: &CoverageMap,
    ) -> Self {
        let mut per_class_counts = ClassCounts::default();
        for pred in predictions {
            per_class_counts.add(pred.predicted_class);
        }
        let flyer_count = predictions.iter().filter(|x| x.is_flyer).count();
        let total_peptides = predictions.len();

        Self {
            protein_length,
            total_peptides,
            unique_peptides: count_unique_sequences(
                predictions.iter().map(|x| x.peptide.sequence.as_str()),
            ),
            flyer_count,
            non_flyer_count: total_peptides - flyer_count,
            per_class_counts,
            flyer_percentage: percent(flyer_count, total_peptides),
            coverage_percent: percent(coverage.covered_positions(), protein_length),
            flyer_coverage_percent: percent(
                coverage.positions_with(|x| x.is_flyer()),
                protein_length,
            ),
            non_flyer_coverage_percent: percent(
                coverage.positions_with(|x| !x.is_flyer()),
                protein_length,
            ),
        }
    }

    /// Builds the coverage map as well; handy when only numbers are needed.
    pub fn from_predictions(protein_length: usize, predictions: &[PredictionResult]) -> Self {
        let coverage = CoverageMap::build(protein_length, predictions);
        Self::compute(protein_length, predictions, &coverage)
    }
}
