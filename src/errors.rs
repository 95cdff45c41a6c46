use thiserror::Error;

/// Failure reported by a classifier backend. Passed through untouched.
pub type ClassifierError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum FlyerMapError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid residue '{residue}' at position {position}")]
    InvalidResidue { residue: char, position: usize },

    #[error("Peptide length {length} exceeds encoder width {max}")]
    PeptideTooLong { length: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Classifier returned {got} predictions for {expected} peptides")]
    ClassifierOutputMismatch { expected: usize, got: usize },

    #[error("No prediction available for peptide {0}")]
    UnknownPeptide(String),

    #[error("Classifier error: {0}")]
    Classifier(ClassifierError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlyerMapError>;

impl From<ClassifierError> for FlyerMapError {
    fn from(x: ClassifierError) -> Self {
        Self::Classifier(x)
    }
}
