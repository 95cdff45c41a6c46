use std::sync::Arc;

/// Identifier used when the input carries no `>` header line.
pub const UNKNOWN_IDENTIFIER: &str = "Unknown";

/// The 20 standard amino acids, one-letter codes.
pub const STANDARD_RESIDUES: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";

pub fn is_standard_residue(residue: char) -> bool {
    residue.is_ascii() && STANDARD_RESIDUES.contains(&(residue as u8))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinRecord {
    pub identifier: String,
    pub sequence: Arc<str>,
}

impl ProteinRecord {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ProteinRecordBuilder {
    pub identifier: Option<String>,
    pub sequence: String,
}

impl ProteinRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn has_identifier(&self) -> bool {
        self.identifier.is_some()
    }

    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    /// Appends a residue line, dropping all whitespace and upper-casing.
    pub fn append_sequence(mut self, line: &str) -> Self {
        self.sequence.extend(
            line.chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_ascii_uppercase()),
        );
        self
    }

    pub fn build(self) -> ProteinRecord {
        ProteinRecord {
            identifier: self
                .identifier
                .unwrap_or_else(|| UNKNOWN_IDENTIFIER.to_string()),
            sequence: self.sequence.into(),
        }
    }
}
