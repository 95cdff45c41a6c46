pub mod batching;

use crate::encoding::peptide_encoder::EncodedPeptide;
use crate::errors::{ClassifierError, Result};
use crate::models::ClassProbabilities;
use log::*;
use std::sync::{Mutex, OnceLock};

/// Batch inference backend.
///
/// Implementations return one probability vector per input, in input order,
/// with classes ordered `[NonFlyer, Weak, Intermediate, Strong]`. The same
/// input must always produce the same output. Shared read-only between
/// concurrent requests, hence `Sync`.
pub trait DetectabilityClassifier: Send + Sync {
    fn predict_batch(
        &self,
        batch: &[EncodedPeptide],
    ) -> std::result::Result<Vec<ClassProbabilities>, ClassifierError>;
}

impl<C: DetectabilityClassifier + ?Sized> DetectabilityClassifier for &C {
    fn predict_batch(
        &self,
        batch: &[EncodedPeptide],
    ) -> std::result::Result<Vec<ClassProbabilities>, ClassifierError> {
        (**self).predict_batch(batch)
    }
}

impl<C: DetectabilityClassifier + ?Sized> DetectabilityClassifier for Box<C> {
    fn predict_batch(
        &self,
        batch: &[EncodedPeptide],
    ) -> std::result::Result<Vec<ClassProbabilities>, ClassifierError> {
        (**self).predict_batch(batch)
    }
}

/// A classifier constructed on first use and shared immutably afterwards.
///
/// Concurrent callers of `get` wait on a single construction. A failed
/// construction is not cached; the next caller tries again.
pub struct LazyClassifier<C> {
    cell: OnceLock<C>,
    init_guard: Mutex<()>,
    init: Box<dyn Fn() -> Result<C> + Send + Sync>,
}

impl<C: DetectabilityClassifier> LazyClassifier<C> {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Result<C> + Send + Sync + 'static,
    {
        Self {
            cell: OnceLock::new(),
            init_guard: Mutex::new(()),
            init: Box::new(init),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get(&self) -> Result<&C> {
        if let Some(classifier) = self.cell.get() {
            return Ok(classifier);
        }
        // A panicking init poisons the guard but leaves the cell empty.
        let _guard = self
            .init_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(classifier) = self.cell.get() {
            return Ok(classifier);
        }
        info!("Constructing classifier");
        let classifier = (self.init)()?;
        Ok(self.cell.get_or_init(|| classifier))
    }
}

impl<C> std::fmt::Debug for LazyClassifier<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyClassifier")
            .field("initialized", &self.cell.get().is_some())
            .finish()
    }
}
