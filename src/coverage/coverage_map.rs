use crate::models::{DetectabilityClass, PredictionResult};
use serde::{Serialize, Serializer};

/// Small bit set over the four detectability classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClassSet(u8);

impl ClassSet {
    pub fn insert(&mut self, class: DetectabilityClass) {
        self.0 |= 1 << class.ordinal();
    }

    pub fn contains(&self, class: DetectabilityClass) -> bool {
        self.0 & (1 << class.ordinal()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = DetectabilityClass> + '_ {
        DetectabilityClass::ALL
            .into_iter()
            .filter(move |x| self.contains(*x))
    }

    /// Highest class in the set.
    pub fn max(&self) -> Option<DetectabilityClass> {
        self.iter().last()
    }
}

impl Serialize for ClassSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

/// Per-position view of which classes cover each residue of a protein.
///
/// A position's display class is the highest class among the peptides that
/// cover it, so any flying peptide marks the residue as flying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageMap {
    observed: Vec<ClassSet>,
}

impl CoverageMap {
    /// Folds predictions onto `[0, protein_length)`.
    ///
    /// Peptide intervals reaching past `protein_length` are clipped.
    pub fn build(protein_length: usize, predictions: &[PredictionResult]) -> Self {
        let mut observed = vec![ClassSet::default(); protein_length];
        for pred in predictions {
            let end = pred.peptide.end.min(protein_length);
            let start = pred.peptide.start.min(end);
            for slot in observed[start..end].iter_mut() {
                slot.insert(pred.predicted_class);
            }
        }
        Self { observed }
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn observed(&self, position: usize) -> Option<ClassSet> {
        self.observed.get(position).copied()
    }

    /// `None` for uncovered (or out of range) positions.
    pub fn display_class(&self, position: usize) -> Option<DetectabilityClass> {
        self.observed.get(position).and_then(|x| x.max())
    }

    pub fn is_covered(&self, position: usize) -> bool {
        self.observed
            .get(position)
            .map(|x| !x.is_empty())
            .unwrap_or(false)
    }

    pub fn display_classes(&self) -> impl Iterator<Item = Option<DetectabilityClass>> + '_ {
        self.observed.iter().map(|x| x.max())
    }

    pub fn covered_positions(&self) -> usize {
        self.observed.iter().filter(|x| !x.is_empty()).count()
    }

    /// Positions covered by at least one peptide satisfying `pred`.
    pub fn positions_with(&self, pred: impl Fn(DetectabilityClass) -> bool) -> usize {
        self.observed
            .iter()
            .filter(|x| x.iter().any(&pred))
            .count()
    }
}
