//! Corpus statistics gathered before a FROC evaluation.
//!
//! These counts describe the data that went into the curve and are logged
//! alongside the sensitivity summary.

use serde::{Deserialize, Serialize};

use crate::types::ImageRecord;

/// Counts describing an evaluation corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of images in the corpus
    pub images: usize,

    /// Number of predictions across all images
    pub predictions: usize,

    /// Number of ground-truth boxes across all images
    pub ground_truths: usize,

    /// Images that carry no ground truth (every prediction there is a miss)
    pub images_without_ground_truth: usize,

    /// Images on which the detector produced nothing
    pub images_without_predictions: usize,
}

impl CorpusStats {
    /// Create a new `CorpusStats` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one image record
    pub fn add_image(&mut self, record: &ImageRecord) {
        self.images += 1;
        self.predictions += record.predictions.len();
        self.ground_truths += record.ground_truths.len();

        if record.ground_truths.is_empty() {
            self.images_without_ground_truth += 1;
        }
        if record.predictions.is_empty() {
            self.images_without_predictions += 1;
        }
    }

    /// Upper bound of the false-positives-per-image axis
    pub fn max_fp_per_image(&self) -> f64 {
        if self.images == 0 {
            return 0.0;
        }
        self.predictions as f64 / self.images as f64
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "CorpusStats {{ images: {}, predictions: {}, ground_truths: {}, without_gt: {}, without_predictions: {} }}",
            self.images,
            self.predictions,
            self.ground_truths,
            self.images_without_ground_truth,
            self.images_without_predictions
        )
    }
}

impl<'a> FromIterator<&'a ImageRecord> for CorpusStats {
    fn from_iter<I: IntoIterator<Item = &'a ImageRecord>>(iter: I) -> Self {
        let mut stats = Self::new();
        for record in iter {
            stats.add_image(record);
        }
        stats
    }
}
