use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::ops::Range;

/// A digested stretch of a protein.
///
/// Owns a copy of its residues; `start..end` is the half-open interval it
/// occupies in the parent sequence, so `end - start == sequence.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Peptide {
    pub sequence: String,
    pub start: usize,
    pub end: usize,
}

impl Peptide {
    pub fn from_parent(parent: &str, range: Range<usize>) -> Self {
        Self {
            sequence: parent[range.clone()].to_string(),
            start: range.start,
            end: range.end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Number of distinct residue strings, ignoring where they occur.
pub fn count_unique_sequences<'a>(sequences: impl IntoIterator<Item = &'a str>) -> usize {
    sequences.into_iter().collect::<HashSet<_>>().len()
}

/// Detectability classes, ordered from least to most detectable.
///
/// The derived `Ord` follows declaration order and is what overlap resolution
/// relies on, so do not reorder the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DetectabilityClass {
    NonFlyer,
    Weak,
    Intermediate,
    Strong,
}

pub const NUM_CLASSES: usize = 4;

impl DetectabilityClass {
    /// In classifier output order.
    pub const ALL: [DetectabilityClass; NUM_CLASSES] = [
        DetectabilityClass::NonFlyer,
        DetectabilityClass::Weak,
        DetectabilityClass::Intermediate,
        DetectabilityClass::Strong,
    ];

    pub fn ordinal(&self) -> usize {
        match self {
            DetectabilityClass::NonFlyer => 0,
            DetectabilityClass::Weak => 1,
            DetectabilityClass::Intermediate => 2,
            DetectabilityClass::Strong => 3,
        }
    }

    pub fn is_flyer(&self) -> bool {
        !matches!(self, DetectabilityClass::NonFlyer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectabilityClass::NonFlyer => "Non-Flyer",
            DetectabilityClass::Weak => "Weak Flyer",
            DetectabilityClass::Intermediate => "Intermediate Flyer",
            DetectabilityClass::Strong => "Strong Flyer",
        }
    }

    /// One-character code used by the text coverage map.
    pub fn symbol(&self) -> char {
        match self {
            DetectabilityClass::NonFlyer => 'n',
            DetectabilityClass::Weak => 'w',
            DetectabilityClass::Intermediate => 'i',
            DetectabilityClass::Strong => 's',
        }
    }
}

impl Serialize for DetectabilityClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Per-class probabilities in `[NonFlyer, Weak, Intermediate, Strong]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities(pub [f32; NUM_CLASSES]);

impl ClassProbabilities {
    pub fn get(&self, class: DetectabilityClass) -> f32 {
        self.0[class.ordinal()]
    }

    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }

    /// Arg-max over the four classes. On exact ties the lower class wins.
    pub fn argmax(&self) -> DetectabilityClass {
        let mut best = DetectabilityClass::NonFlyer;
        for class in DetectabilityClass::ALL.iter().skip(1) {
            if self.get(*class) > self.get(best) {
                best = *class;
            }
        }
        best
    }
}

impl From<[f32; NUM_CLASSES]> for ClassProbabilities {
    fn from(x: [f32; NUM_CLASSES]) -> Self {
        Self(x)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub peptide: Peptide,
    pub class_probabilities: ClassProbabilities,
    pub predicted_class: DetectabilityClass,
    pub is_flyer: bool,
}

impl PredictionResult {
    pub fn new(peptide: Peptide, class_probabilities: ClassProbabilities) -> Self {
        let predicted_class = class_probabilities.argmax();
        Self {
            peptide,
            class_probabilities,
            predicted_class,
            is_flyer: predicted_class.is_flyer(),
        }
    }
}
