use super::DetectabilityClassifier;
use crate::encoding::peptide_encoder::{encode_peptides, EncodedPeptide};
use crate::errors::{FlyerMapError, Result};
use crate::models::{Peptide, PredictionResult};
use log::*;
use std::num::NonZeroUsize;
use std::time::Instant;

const PROBABILITY_SUM_TOLERANCE: f32 = 1e-3;

/// Splits encoded peptides into consecutive chunks of at most `chunk_size`.
pub struct PeptideBatches<'a> {
    encoded: &'a [EncodedPeptide],
    chunk_size: usize,
    iteration_index: usize,
}

impl<'a> PeptideBatches<'a> {
    pub fn new(encoded: &'a [EncodedPeptide], chunk_size: NonZeroUsize) -> Self {
        Self {
            encoded,
            chunk_size: chunk_size.get(),
            iteration_index: 0,
        }
    }

    fn get_chunk(&self, chunk_index: usize) -> Option<&'a [EncodedPeptide]> {
        let start = chunk_index * self.chunk_size;
        if start >= self.encoded.len() {
            return None;
        }
        let end = (start + self.chunk_size).min(self.encoded.len());
        Some(&self.encoded[start..end])
    }
}

impl<'a> Iterator for PeptideBatches<'a> {
    type Item = &'a [EncodedPeptide];

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.get_chunk(self.iteration_index);
        if out.is_some() {
            self.iteration_index += 1;
        }
        out
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for PeptideBatches<'_> {
    fn len(&self) -> usize {
        self.encoded.len().div_ceil(self.chunk_size) - self.iteration_index
    }
}

/// Encodes every peptide, then runs the classifier once per batch.
///
/// Encoding happens up front so a bad peptide aborts before any classifier
/// call. Output order matches `peptides`. Classifier failures are returned
/// unchanged.
pub fn classify_peptides<C: DetectabilityClassifier + ?Sized>(
    peptides: Vec<Peptide>,
    classifier: &C,
    batch_size: usize,
) -> Result<Vec<PredictionResult>> {
    let batch_size = NonZeroUsize::new(batch_size).ok_or_else(|| {
        FlyerMapError::InvalidConfig("batch_size must be at least 1".into())
    })?;
    if peptides.is_empty() {
        return Ok(Vec::new());
    }
    let encoded = encode_peptides(&peptides)?;

    let st = Instant::now();
    let batches = PeptideBatches::new(&encoded, batch_size);
    let tot_batches = batches.len();
    let mut probabilities = Vec::with_capacity(encoded.len());
    for (batch_num, batch) in batches.enumerate() {
        debug!("Batch {}/{}", batch_num + 1, tot_batches);
        let out = classifier.predict_batch(batch)?;
        if out.len() != batch.len() {
            return Err(FlyerMapError::ClassifierOutputMismatch {
                expected: batch.len(),
                got: out.len(),
            });
        }
        probabilities.extend(out);
    }
    info!(
        "Classified {} peptides in {} batches in {:?}",
        peptides.len(),
        tot_batches,
        st.elapsed()
    );

    Ok(peptides
        .into_iter()
        .zip(probabilities)
        .map(|(peptide, probs)| {
            if (probs.sum() - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
                warn!(
                    "Probabilities for {} sum to {} ({:?})",
                    peptide.sequence,
                    probs.sum(),
                    probs
                );
            }
            PredictionResult::new(peptide, probs)
        })
        .collect())
}
