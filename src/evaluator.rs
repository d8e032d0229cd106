//! Main evaluation orchestrator for FROC metrics.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::FrocConfig;
use crate::error::Result;
use crate::froc::build_froc;
use crate::sampler::sample;
use crate::stats::CorpusStats;
use crate::types::{BoundingBox, FrocCurve, ImageRecord, OperatingPointTable, ScoredBox};

/// Everything produced by one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrocReport {
    pub curve: FrocCurve,
    pub operating_points: OperatingPointTable,
    pub stats: CorpusStats,
    /// Budgets that entered `mean_sensitivity`.
    pub mean_budgets: Vec<f64>,
    /// Mean sensitivity over `mean_budgets`, `None` when that list is empty.
    pub mean_sensitivity: Option<f64>,
}

impl FrocReport {
    /// Line with the comma-joined sensitivities, e.g. `0.5000, 0.7500`.
    pub fn sensitivity_line(&self) -> String {
        self.operating_points.format_sensitivities()
    }

    /// Line with the summary mean, e.g. `mean of [0.5, 1]: 0.6250`.
    pub fn mean_line(&self) -> String {
        let budgets = self
            .mean_budgets
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        match self.mean_sensitivity {
            Some(mean) => format!("mean of [{}]: {:.4}", budgets, mean),
            None => format!("mean of [{}]: n/a", budgets),
        }
    }
}

impl fmt::Display for FrocReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sensitivity_line())?;
        write!(f, "{}", self.mean_line())
    }
}

/// Evaluate a corpus keyed by image identifier.
///
/// Images are processed in ascending key order. The curve is built with
/// `config.iou_threshold`, sampled at `config.fp_budgets`, and the mean over
/// the first `config.mean_leading` budgets is reported. The two summary
/// lines are logged at `info` level.
///
/// # Errors
///
/// Propagates every error of [`build_froc`] and [`sample`]; an invalid
/// config is rejected before any work is done.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use froc_eval::config::FrocConfig;
/// use froc_eval::evaluator::evaluate;
/// use froc_eval::types::{BoundingBox, ImageRecord, ScoredBox};
///
/// let mut records = BTreeMap::new();
/// records.insert(
///     "a.png".to_string(),
///     ImageRecord::new(
///         vec![ScoredBox::new(0.0, 0.0, 9.0, 9.0, 0.9)],
///         vec![BoundingBox::new(0.0, 0.0, 9.0, 9.0)],
///     ),
/// );
/// records.insert(
///     "b.png".to_string(),
///     ImageRecord::new(
///         vec![ScoredBox::new(50.0, 50.0, 59.0, 59.0, 0.8)],
///         vec![BoundingBox::new(0.0, 0.0, 9.0, 9.0)],
///     ),
/// );
///
/// let report = evaluate(&records, &FrocConfig::default()).unwrap();
/// assert_eq!(report.sensitivity_line(), "0.5000, 0.5000, 0.5000, 0.5000, 0.5000");
/// ```
pub fn evaluate(
    records: &BTreeMap<String, ImageRecord>,
    config: &FrocConfig,
) -> Result<FrocReport> {
    config.validate()?;

    let stats: CorpusStats = records.values().collect();
    debug!(
        max_fp_per_image = stats.max_fp_per_image(),
        "{}",
        stats.summary_string()
    );

    for (key, record) in records {
        if record.ground_truths.is_empty() {
            debug!(
                image = %key,
                predictions = record.predictions.len(),
                "image has no ground truth, all predictions count as false positives"
            );
        }
    }

    let (predictions, ground_truths): (Vec<&[ScoredBox]>, Vec<&[BoundingBox]>) = records
        .values()
        .map(|record| (record.predictions.as_slice(), record.ground_truths.as_slice()))
        .unzip();

    let curve = build_froc(&predictions, &ground_truths, config.iou_threshold)?;
    let operating_points = sample(&curve, &config.fp_budgets)?;

    let mean_budgets: Vec<f64> = config
        .fp_budgets
        .iter()
        .take(config.mean_leading)
        .copied()
        .collect();
    let mean_sensitivity = operating_points.mean_of_leading(config.mean_leading);

    let report = FrocReport {
        curve,
        operating_points,
        stats,
        mean_budgets,
        mean_sensitivity,
    };

    info!("{}", report.sensitivity_line());
    info!("{}", report.mean_line());

    Ok(report)
}

/// Build and sample a FROC curve from parallel per-image slices.
///
/// This is the record-free path: `predictions_by_image[i]` and
/// `ground_truths_by_image[i]` describe the same image.
///
/// # Example
///
/// ```
/// use froc_eval::evaluator::evaluate_froc;
/// use froc_eval::types::{BoundingBox, ScoredBox};
///
/// let predictions = vec![vec![
///     ScoredBox::new(0.0, 0.0, 9.0, 9.0, 0.9),
///     ScoredBox::new(40.0, 40.0, 49.0, 49.0, 0.3),
/// ]];
/// let ground_truths = vec![vec![BoundingBox::new(0.0, 0.0, 9.0, 9.0)]];
///
/// let table = evaluate_froc(&predictions, &ground_truths, 0.5, &[0.5, 2.0]).unwrap();
/// assert_eq!(table.sensitivities(), vec![1.0, 1.0]);
/// ```
pub fn evaluate_froc<P, G>(
    predictions_by_image: &[P],
    ground_truths_by_image: &[G],
    iou_threshold: f64,
    fp_budgets: &[f64],
) -> Result<OperatingPointTable>
where
    P: AsRef<[ScoredBox]>,
    G: AsRef<[BoundingBox]>,
{
    let curve = build_froc(predictions_by_image, ground_truths_by_image, iou_threshold)?;
    sample(&curve, fp_budgets)
}
