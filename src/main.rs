use clap::Parser;
use flyermap::classifier::LazyClassifier;
use flyermap::config::PipelineConfig;
use flyermap::data_sources::prediction_table::PredictionTable;
use flyermap::errors::FlyerMapError;
use flyermap::pipeline::{DetectabilityPipeline, DetectabilityReport};
use flyermap::protein::fasta::ProteinRecordCollection;
use flyermap::report::coverage_text::render_coverage;
use flyermap::report::csv_table::{file_stem, predictions_csv_path, write_predictions_to_csv};
use indicatif::ProgressBar;
use log::info;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Predict which tryptic peptides of a protein are likely to be observed
/// in a mass-spectrometry run, and map them back onto the sequence.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// FASTA file with one or more protein records
    fasta: PathBuf,

    /// Classifier outputs to look peptides up in (JSON array, or NDJSON
    /// when the extension is .ndjson/.jsonl)
    #[arg(short, long)]
    predictions: PathBuf,

    /// JSON pipeline configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    min_length: Option<usize>,

    #[arg(long)]
    max_length: Option<usize>,

    #[arg(long)]
    missed_cleavages: Option<usize>,

    #[arg(long)]
    batch_size: Option<usize>,

    /// Where the per-protein CSV and summary JSON files go
    #[arg(short, long, default_value = "./results/")]
    output_dir: PathBuf,

    /// Print the text coverage map for every protein
    #[arg(long)]
    show_map: bool,
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig, FlyerMapError> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(x) = self.min_length {
            config.digestion.min_length = x;
        }
        if let Some(x) = self.max_length {
            config.digestion.max_length = x;
        }
        if let Some(x) = self.missed_cleavages {
            config.digestion.max_missed_cleavages = x;
        }
        if let Some(x) = self.batch_size {
            config.batch_size = x;
        }
        config.validate()?;
        Ok(config)
    }
}

fn write_report(report: &DetectabilityReport, out_dir: &Path) -> Result<(), FlyerMapError> {
    write_predictions_to_csv(
        &report.predictions,
        predictions_csv_path(out_dir, &report.identifier),
    )?;
    let summary_path = out_dir.join(format!("{}_summary.json", file_stem(&report.identifier)));
    let file = std::fs::File::create(summary_path)?;
    serde_json::to_writer_pretty(file, &report.statistics)?;
    Ok(())
}

fn main() -> std::result::Result<(), FlyerMapError> {
    env_logger::init();
    let args = Cli::parse();

    let config = args.pipeline_config()?;
    info!("Running with configuration: \n {:?}", config);
    let pipeline = DetectabilityPipeline::new(config)?;

    let predictions_path = args.predictions.clone();
    let classifier = LazyClassifier::new(move || PredictionTable::from_file(&predictions_path));

    let proteins = ProteinRecordCollection::from_fasta_file(&args.fasta)?;
    info!("Read {} proteins from {:?}", proteins.len(), args.fasta);

    if !args.output_dir.exists() {
        std::fs::create_dir_all(&args.output_dir)?;
    }

    let start = Instant::now();
    let classifier = classifier.get()?;
    let progress = ProgressBar::new(proteins.len() as u64);
    let reports = proteins
        .records
        .par_iter()
        .map(|record| {
            let report = pipeline.run(record, classifier)?;
            write_report(&report, &args.output_dir)?;
            progress.inc(1);
            Ok(report)
        })
        .collect::<Result<Vec<DetectabilityReport>, FlyerMapError>>()?;
    progress.finish_and_clear();
    info!("Processed {} proteins in {:?}", reports.len(), start.elapsed());

    for report in &reports {
        let stats = &report.statistics;
        println!(
            "{}\tlength={}\tpeptides={}\tflyers={} ({:.1}%)\tnon_flyers={}\tcoverage={:.1}%",
            report.identifier,
            stats.protein_length,
            stats.total_peptides,
            stats.flyer_count,
            stats.flyer_percentage,
            stats.non_flyer_count,
            stats.coverage_percent,
        );
        if args.show_map {
            println!("{}", render_coverage(&report.sequence, &report.coverage));
        }
    }
    Ok(())
}
