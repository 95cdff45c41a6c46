use super::models::{is_standard_residue, ProteinRecord, ProteinRecordBuilder};
use crate::errors::{FlyerMapError, Result};
use log::*;
use std::path::Path;

/// Parses a single FASTA-like record into a validated [`ProteinRecord`].
///
/// The header line is optional; when present its text (minus the `>`) becomes
/// the identifier, otherwise the identifier is `"Unknown"`. Every other line is
/// stripped of whitespace, upper-cased and concatenated.
///
/// Example:
/// ```
/// use flyermap::protein::fasta::parse_fasta;
/// let record = parse_fasta(">sp|P69905|HBA_HUMAN\nmvlspadk\nTNVK").unwrap();
/// assert_eq!(record.identifier, "sp|P69905|HBA_HUMAN");
/// assert_eq!(record.sequence.as_ref(), "MVLSPADKTNVK");
/// ```
pub fn parse_fasta(text: &str) -> Result<ProteinRecord> {
    let mut builder = ProteinRecordBuilder::new();
    for (i, line) in text.trim_start().lines().enumerate() {
        match line.trim().strip_prefix('>') {
            Some(header) if i == 0 => {
                builder = builder.with_identifier(header.trim());
            }
            Some(header) => {
                return Err(FlyerMapError::MalformedInput(format!(
                    "Expected a single record, found a second header: '>{}'",
                    header.trim()
                )));
            }
            None => {
                builder = builder.append_sequence(line);
            }
        }
    }
    finish_record(builder)
}

/// Fails with the first symbol that is not one of the 20 standard residues.
pub fn validate_sequence(sequence: &str) -> Result<()> {
    match sequence
        .chars()
        .enumerate()
        .find(|(_, c)| !is_standard_residue(*c))
    {
        Some((position, residue)) => Err(FlyerMapError::InvalidResidue { residue, position }),
        None => Ok(()),
    }
}

fn finish_record(builder: ProteinRecordBuilder) -> Result<ProteinRecord> {
    if builder.is_empty() {
        let which = builder
            .identifier
            .as_deref()
            .map(|x| format!(" for '{}'", x))
            .unwrap_or_default();
        return Err(FlyerMapError::MalformedInput(format!(
            "No residue lines found{}",
            which
        )));
    }
    let record = builder.build();
    validate_sequence(&record.sequence)?;
    Ok(record)
}

#[derive(Debug)]
pub struct ProteinRecordCollection {
    pub records: Vec<ProteinRecord>,
}

impl ProteinRecordCollection {
    /// Parses a multi-record FASTA string. Every record must carry residues
    /// and pass validation; the first failure aborts the whole parse.
    pub fn from_fasta(fasta: &str) -> Result<ProteinRecordCollection> {
        let mut records = vec![];
        let mut current = ProteinRecordBuilder::new();
        for line in fasta.lines() {
            let trimmed = line.trim();
            if let Some(header) = trimmed.strip_prefix('>') {
                if current.has_identifier() || !current.is_empty() {
                    records.push(finish_record(current)?);
                }
                current = ProteinRecordBuilder::new().with_identifier(header.trim());
            } else {
                current = current.append_sequence(trimmed);
            }
        }
        records.push(finish_record(current)?);
        debug!("Parsed {} protein records", records.len());
        Ok(ProteinRecordCollection { records })
    }

    pub fn from_fasta_file<P: AsRef<Path>>(file: P) -> Result<ProteinRecordCollection> {
        let fasta = std::fs::read_to_string(file)?;
        Self::from_fasta(&fasta)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
