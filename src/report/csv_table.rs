use crate::errors::Result;
use crate::models::{DetectabilityClass, PredictionResult};
use csv::Writer;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

const CSV_LABELS: [&str; 10] = [
    "peptide",
    "start",
    "end",
    "length",
    "predicted_class",
    "non_flyer",
    "weak_flyer",
    "intermediate_flyer",
    "strong_flyer",
    "is_flyer",
];

pub fn as_csv_record(result: &PredictionResult) -> [String; 10] {
    let prob = |class| format!("{:.3}", result.class_probabilities.get(class));
    [
        result.peptide.sequence.clone(),
        result.peptide.start.to_string(),
        result.peptide.end.to_string(),
        result.peptide.len().to_string(),
        result.predicted_class.as_str().to_string(),
        prob(DetectabilityClass::NonFlyer),
        prob(DetectabilityClass::Weak),
        prob(DetectabilityClass::Intermediate),
        prob(DetectabilityClass::Strong),
        result.is_flyer.to_string(),
    ]
}

pub fn write_predictions<W: io::Write>(results: &[PredictionResult], writer: W) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(CSV_LABELS)?;
    for result in results {
        writer.write_record(as_csv_record(result))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_predictions_to_csv<P: AsRef<Path>>(
    results: &[PredictionResult],
    out_path: P,
) -> Result<()> {
    let start = Instant::now();
    let file = std::fs::File::create(out_path.as_ref())?;
    write_predictions(results, file)?;
    log::info!(
        "Writing took {:?} -> {:?}",
        start.elapsed(),
        out_path.as_ref()
    );
    Ok(())
}

/// Identifier turned into a file stem: anything outside `[A-Za-z0-9._-]`
/// becomes `_`.
pub fn file_stem(identifier: &str) -> String {
    identifier
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn predictions_csv_path(out_dir: &Path, identifier: &str) -> PathBuf {
    out_dir.join(format!("{}_detectability.csv", file_stem(identifier)))
}
