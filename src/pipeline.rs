use crate::classifier::batching::classify_peptides;
use crate::classifier::DetectabilityClassifier;
use crate::config::PipelineConfig;
use crate::coverage::coverage_map::CoverageMap;
use crate::coverage::statistics::SummaryStatistics;
use crate::errors::Result;
use crate::models::PredictionResult;
use crate::protein::fasta::parse_fasta;
use crate::protein::models::ProteinRecord;
use log::*;
use serde::Serialize;
use std::time::Instant;

/// Everything the report layer needs for one protein.
#[derive(Debug, Clone, Serialize)]
pub struct DetectabilityReport {
    pub identifier: String,
    pub sequence: String,
    pub protein_length: usize,
    pub predictions: Vec<PredictionResult>,
    pub coverage: CoverageMap,
    pub statistics: SummaryStatistics,
}

/// Normalize, digest, encode, classify in batches, fold onto the protein.
///
/// Holds no per-request state; one instance can serve many proteins,
/// including from several threads as long as the classifier is shared
/// read-only.
#[derive(Debug, Clone)]
pub struct DetectabilityPipeline {
    config: PipelineConfig,
}

impl DetectabilityPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run_text<C: DetectabilityClassifier + ?Sized>(
        &self,
        text: &str,
        classifier: &C,
    ) -> Result<DetectabilityReport> {
        let record = parse_fasta(text)?;
        self.run(&record, classifier)
    }

    pub fn run<C: DetectabilityClassifier + ?Sized>(
        &self,
        record: &ProteinRecord,
        classifier: &C,
    ) -> Result<DetectabilityReport> {
        let st = Instant::now();
        let peptides = self.config.digestion.digest(&record.sequence);
        if peptides.is_empty() {
            warn!(
                "No peptides of length {}-{} in {}",
                self.config.digestion.min_length,
                self.config.digestion.max_length,
                record.identifier
            );
        }
        let predictions = classify_peptides(peptides, classifier, self.config.batch_size)?;

        let protein_length = record.len();
        let coverage = CoverageMap::build(protein_length, &predictions);
        let statistics = SummaryStatistics::compute(protein_length, &predictions, &coverage);
        info!(
            "{}: {} peptides, {} flyers, {:.1}% coverage in {:?}",
            record.identifier,
            statistics.total_peptides,
            statistics.flyer_count,
            statistics.coverage_percent,
            st.elapsed()
        );

        Ok(DetectabilityReport {
            identifier: record.identifier.clone(),
            sequence: record.sequence.to_string(),
            protein_length,
            predictions,
            coverage,
            statistics,
        })
    }
}
