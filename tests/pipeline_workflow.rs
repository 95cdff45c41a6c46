use flyermap::classifier::{DetectabilityClassifier, LazyClassifier};
use flyermap::config::PipelineConfig;
use flyermap::data_sources::prediction_table::PredictionTable;
use flyermap::digest::digestion::DigestionParameters;
use flyermap::encoding::peptide_encoder::EncodedPeptide;
use flyermap::errors::{ClassifierError, FlyerMapError};
use flyermap::models::{ClassProbabilities, DetectabilityClass};
use flyermap::pipeline::DetectabilityPipeline;
use flyermap::protein::fasta::ProteinRecordCollection;
use flyermap::report::csv_table::write_predictions;

const HBA_HUMAN: &str = r#">sp|P69905|HBA_HUMAN Hemoglobin subunit alpha OS=Homo sapiens
MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHFDLSHGSAQVKGH
GKKVADALTNAVAHVDDMPNALSALSDLHAHKLRVDPVNFKLLSHCLLVTLAAHLPAEF
TPAVHASLDKFLASVSTVLTSKYR"#;

const INS_HUMAN: &str = r#">sp|P01308|INS_HUMAN Insulin OS=Homo sapiens
MALWMRLLPLLALLALWGPDPAAAFVNQHLCGSHLVEALYLVCGERGFFYTPKTRREAED
LQVGQVELGGGPGAGSLQPLALEGSLQKRGIVEQCCTSICSLYQLENYCN"#;

/// Deterministic stand-in for a model: class from peptide length.
struct LengthClassifier;

impl DetectabilityClassifier for LengthClassifier {
    fn predict_batch(
        &self,
        batch: &[EncodedPeptide],
    ) -> Result<Vec<ClassProbabilities>, ClassifierError> {
        Ok(batch
            .iter()
            .map(|x| match x.residue_count() {
                0..=7 => ClassProbabilities([0.7, 0.1, 0.1, 0.1]),
                8..=12 => ClassProbabilities([0.1, 0.7, 0.1, 0.1]),
                13..=20 => ClassProbabilities([0.1, 0.1, 0.7, 0.1]),
                _ => ClassProbabilities([0.1, 0.1, 0.1, 0.7]),
            })
            .collect())
    }
}

struct AllNonFlyers;

impl DetectabilityClassifier for AllNonFlyers {
    fn predict_batch(
        &self,
        batch: &[EncodedPeptide],
    ) -> Result<Vec<ClassProbabilities>, ClassifierError> {
        Ok(vec![ClassProbabilities([0.97, 0.01, 0.01, 0.01]); batch.len()])
    }
}

fn pipeline(min_length: usize, max_length: usize, missed: usize) -> DetectabilityPipeline {
    DetectabilityPipeline::new(PipelineConfig {
        digestion: DigestionParameters {
            min_length,
            max_length,
            max_missed_cleavages: missed,
        },
        batch_size: 3,
    })
    .unwrap()
}

#[test]
fn test_hemoglobin_workflow() {
    let report = pipeline(6, 40, 0)
        .run_text(HBA_HUMAN, &LengthClassifier)
        .unwrap();
    assert_eq!(report.protein_length, 142);
    let seqs: Vec<&str> = report
        .predictions
        .iter()
        .map(|x| x.peptide.sequence.as_str())
        .collect();
    assert_eq!(
        seqs,
        vec![
            "MVLSPADK",
            "VGAHAGEYGAEALER",
            "MFLSFPTTK",
            "TYFPHFDLSHGSAQVK",
            "VADALTNAVAHVDDMPNALSALSDLHAHK",
            "VDPVNFK",
            "LLSHCLLVTLAAHLPAEFTPAVHASLDK",
            "FLASVSTVLTSK",
        ]
    );
    let first = &report.predictions[0];
    assert_eq!((first.peptide.start, first.peptide.end), (0, 8));
    assert_eq!(first.predicted_class, DetectabilityClass::Weak);

    let stats = &report.statistics;
    assert_eq!(stats.total_peptides, 8);
    assert_eq!(stats.unique_peptides, 8);
    assert_eq!(stats.flyer_count, 7);
    assert_eq!(stats.non_flyer_count, 1);
    assert_eq!(stats.per_class_counts.as_array(), [1, 3, 2, 2]);
    assert!((stats.coverage_percent - 100.0 * 124.0 / 142.0).abs() < 1e-9);

    // TNVK (8..12) is too short and stays uncovered.
    for i in 8..12 {
        assert_eq!(report.coverage.display_class(i), None);
    }
    assert_eq!(
        report.coverage.display_class(93),
        Some(DetectabilityClass::NonFlyer)
    );
}

#[test]
fn test_all_non_flyers_keep_coverage() {
    let report = pipeline(6, 40, 0)
        .run_text(HBA_HUMAN, &AllNonFlyers)
        .unwrap();
    assert_eq!(report.statistics.flyer_count, 0);
    assert!(report.statistics.coverage_percent > 0.0);
    for i in 0..report.protein_length {
        if report.coverage.is_covered(i) {
            assert_eq!(
                report.coverage.display_class(i),
                Some(DetectabilityClass::NonFlyer)
            );
        }
    }
}

#[test]
fn test_coverage_grows_as_min_length_drops() {
    for fasta in [HBA_HUMAN, INS_HUMAN] {
        let mut last = -1.0;
        for min_length in (0..=12).rev() {
            let report = pipeline(min_length, 40, 0)
                .run_text(fasta, &LengthClassifier)
                .unwrap();
            let coverage = report.statistics.coverage_percent;
            assert!(
                coverage >= last,
                "Coverage dropped from {} to {} at min_length {}",
                last,
                coverage,
                min_length
            );
            last = coverage;
        }
        assert!((last - 100.0).abs() < 1e-9);
    }
}

#[test]
fn test_missed_cleavages_overlap_resolves_to_max() {
    let report = pipeline(6, 40, 1)
        .run_text(HBA_HUMAN, &LengthClassifier)
        .unwrap();
    for i in 0..report.protein_length {
        let covering = report
            .predictions
            .iter()
            .filter(|x| x.peptide.range().contains(&i))
            .map(|x| x.predicted_class)
            .max();
        assert_eq!(report.coverage.display_class(i), covering, "Position {}", i);
    }
}

#[test]
fn test_prediction_table_backend_end_to_end() {
    let table = PredictionTable::from_entries([
        ("MALWMR", [0.6, 0.2, 0.1, 0.1]),
        ("LLPLLALLALWGPDPAAAFVNQHLCGSHLVEALYLVCGER", [0.1, 0.1, 0.1, 0.7]),
        ("GFFYTPK", [0.2, 0.5, 0.2, 0.1]),
        ("EAEDLQVGQVELGGGPGAGSLQPLALEGSLQK", [0.1, 0.2, 0.6, 0.1]),
        ("GIVEQCCTSICSLYQLENYCN", [0.3, 0.3, 0.3, 0.1]),
    ]);
    let lazy = LazyClassifier::new(move || Ok(table.clone()));
    let collection = ProteinRecordCollection::from_fasta(INS_HUMAN).unwrap();
    let report = pipeline(6, 40, 0)
        .run(&collection.records[0], lazy.get().unwrap())
        .unwrap();
    assert_eq!(report.identifier, "sp|P01308|INS_HUMAN Insulin OS=Homo sapiens");
    assert_eq!(report.statistics.total_peptides, 5);
    assert_eq!(report.statistics.per_class_counts.as_array(), [2, 1, 1, 1]);

    let mut buf = Vec::new();
    write_predictions(&report.predictions, &mut buf).unwrap();
    let csv = String::from_utf8(buf).unwrap();
    assert_eq!(csv.lines().count(), 6);
    assert!(csv.contains("GFFYTPK,46,53,7,Weak Flyer,0.200,0.500,0.200,0.100,true"));
}

#[test]
fn test_missing_prediction_surfaces_classifier_error() {
    let table = PredictionTable::from_entries([("MVLSPADK", [0.1, 0.2, 0.3, 0.4])]);
    let res = pipeline(6, 40, 0).run_text(HBA_HUMAN, &table);
    assert!(
        matches!(res, Err(FlyerMapError::Classifier(_))),
        "Got: {:?}",
        res.map(|x| x.identifier)
    );
}
