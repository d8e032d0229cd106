//! Core data types for FROC evaluation.

use serde::{Deserialize, Serialize};

use crate::error::{FrocEvalError, Result};

/// Axis-aligned bounding box in corner format (xmin, ymin, xmax, ymax).
///
/// Coordinates follow the inclusive-pixel convention: a box spanning
/// columns 10 through 19 has `xmin = 10`, `xmax = 19` and a width of 10.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Width in pixels (`xmax - xmin + 1`).
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin + 1.0
    }

    /// Height in pixels (`ymax - ymin + 1`).
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin + 1.0
    }

    /// Get the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check that all coordinates are finite and the corners are ordered.
    pub fn is_valid(&self) -> bool {
        [self.xmin, self.ymin, self.xmax, self.ymax]
            .iter()
            .all(|v| v.is_finite())
            && self.xmax >= self.xmin
            && self.ymax >= self.ymin
    }

    /// Same as [`is_valid`](Self::is_valid) but reports what is wrong.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(FrocEvalError::InvalidBoundingBox(format!(
                "expected finite corners with max >= min, got {:?}",
                self
            )))
        }
    }
}

/// A predicted box together with the detector's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredBox {
    pub bbox: BoundingBox,
    pub score: f64,
}

impl ScoredBox {
    /// Create a scored box from corner coordinates.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, score: f64) -> Self {
        Self {
            bbox: BoundingBox::new(xmin, ymin, xmax, ymax),
            score,
        }
    }
}

/// Predictions and annotations of a single image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub predictions: Vec<ScoredBox>,
    pub ground_truths: Vec<BoundingBox>,
}

impl ImageRecord {
    pub fn new(predictions: Vec<ScoredBox>, ground_truths: Vec<BoundingBox>) -> Self {
        Self {
            predictions,
            ground_truths,
        }
    }
}

/// Free Response Operating Characteristic curve.
///
/// Entry `i` describes the state after the `i + 1` highest scoring
/// predictions of the whole corpus have been processed. Both
/// `sensitivities` and `fp_per_image` are non-decreasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrocCurve {
    /// Fraction of all ground truths hit so far.
    pub sensitivities: Vec<f64>,
    /// False positives so far divided by the number of images.
    pub fp_per_image: Vec<f64>,
    /// Cumulative hit counter.
    pub hits: Vec<usize>,
    /// Cumulative miss (false positive) counter.
    pub misses: Vec<usize>,
    pub total_ground_truths: usize,
    pub image_count: usize,
}

impl FrocCurve {
    /// Number of points, equal to the number of predictions in the corpus.
    pub fn len(&self) -> usize {
        self.sensitivities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }

    /// Sensitivity after every prediction has been processed.
    pub fn final_sensitivity(&self) -> Option<f64> {
        self.sensitivities.last().copied()
    }

    /// Largest false-positives-per-image value on the curve.
    pub fn max_fp_per_image(&self) -> Option<f64> {
        self.fp_per_image.last().copied()
    }

    /// Iterate over `(fp_per_image, sensitivity)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.fp_per_image
            .iter()
            .copied()
            .zip(self.sensitivities.iter().copied())
    }
}

/// Sensitivity read off the curve at one false-positive budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Requested false positives per image.
    pub fp_per_image: f64,
    pub sensitivity: f64,
    /// `true` when the budget exceeded the curve and the final value was used.
    pub saturated: bool,
}

/// Sampled operating points, in the order the budgets were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingPointTable {
    pub points: Vec<OperatingPoint>,
}

impl OperatingPointTable {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sensitivity values only.
    pub fn sensitivities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.sensitivity).collect()
    }

    /// Mean sensitivity over the first `n` operating points.
    ///
    /// `n` larger than the table uses every point. Returns `None` when no
    /// point takes part.
    pub fn mean_of_leading(&self, n: usize) -> Option<f64> {
        let leading = &self.points[..n.min(self.points.len())];
        if leading.is_empty() {
            return None;
        }
        Some(leading.iter().map(|p| p.sensitivity).sum::<f64>() / leading.len() as f64)
    }

    /// Comma-joined sensitivities with four decimals, e.g. `0.5000, 0.7500`.
    pub fn format_sensitivities(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{:.4}", p.sensitivity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
