//! FROC curve construction by global greedy matching.
//!
//! All predictions of the corpus are pooled, ranked by confidence and
//! replayed one at a time. Each prediction either hits every still-unhit
//! ground truth of its image that it overlaps at or above the IoU threshold,
//! or, when its best overlap falls below the threshold, counts as a false
//! positive. Every prediction contributes exactly one curve point.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{FrocEvalError, Result};
use crate::metrics::iou::{calculate_iou, max_overlap};
use crate::types::{BoundingBox, FrocCurve, ScoredBox};

/// A prediction from the pooled corpus, tagged with the image it belongs to.
#[derive(Debug, Clone, Copy)]
struct RankedPrediction<'a> {
    image_idx: usize,
    prediction: &'a ScoredBox,
}

/// Outcome of replaying one prediction against its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Number of ground truths newly marked as hit (may be zero when every
    /// overlapped ground truth was already hit).
    Hit(usize),
    Miss,
}

/// Build the FROC curve of a corpus.
///
/// `predictions_by_image[i]` and `ground_truths_by_image[i]` must describe
/// the same image. Predictions are ranked by descending score with a stable
/// sort, so equal scores keep their corpus order (image order, then order
/// within the image) and the curve is reproducible.
///
/// A single prediction may hit several ground truths at once. A prediction
/// that only overlaps already-hit ground truths is neither a hit nor a miss.
///
/// # Errors
///
/// - [`FrocEvalError::InvalidInput`] if the two sequences differ in length or
///   a score is NaN.
/// - [`FrocEvalError::InvalidThreshold`] if `iou_threshold` is outside [0, 1].
/// - [`FrocEvalError::InvalidBoundingBox`] for malformed boxes.
/// - [`FrocEvalError::DegenerateInput`] if the corpus has no ground truths.
///
/// # Example
///
/// ```
/// use froc_eval::froc::build_froc;
/// use froc_eval::types::{BoundingBox, ScoredBox};
///
/// let predictions = vec![
///     vec![ScoredBox::new(0.0, 0.0, 9.0, 9.0, 0.9)],
///     vec![ScoredBox::new(50.0, 50.0, 59.0, 59.0, 0.8)],
/// ];
/// let ground_truths = vec![
///     vec![BoundingBox::new(0.0, 0.0, 9.0, 9.0)],
///     vec![BoundingBox::new(0.0, 0.0, 9.0, 9.0)],
/// ];
///
/// let curve = build_froc(&predictions, &ground_truths, 0.5).unwrap();
/// assert_eq!(curve.sensitivities, vec![0.5, 0.5]);
/// assert_eq!(curve.fp_per_image, vec![0.0, 0.5]);
/// ```
pub fn build_froc<P, G>(
    predictions_by_image: &[P],
    ground_truths_by_image: &[G],
    iou_threshold: f64,
) -> Result<FrocCurve>
where
    P: AsRef<[ScoredBox]>,
    G: AsRef<[BoundingBox]>,
{
    validate_inputs(predictions_by_image, ground_truths_by_image, iou_threshold)?;

    let image_count = predictions_by_image.len();
    let total_ground_truths: usize = ground_truths_by_image
        .iter()
        .map(|gts| gts.as_ref().len())
        .sum();
    if total_ground_truths == 0 {
        return Err(FrocEvalError::DegenerateInput(format!(
            "no ground truths across {} images, sensitivity is undefined",
            image_count
        )));
    }

    let ranked = rank_predictions(predictions_by_image);
    debug!(
        predictions = ranked.len(),
        images = image_count,
        ground_truths = total_ground_truths,
        iou_threshold,
        "building FROC curve"
    );

    // One hit flag per ground truth, owned by this call only.
    let mut hit_masks: Vec<Vec<bool>> = ground_truths_by_image
        .iter()
        .map(|gts| vec![false; gts.as_ref().len()])
        .collect();

    let mut n_hits = 0usize;
    let mut n_misses = 0usize;
    let mut curve = FrocCurve {
        sensitivities: Vec::with_capacity(ranked.len()),
        fp_per_image: Vec::with_capacity(ranked.len()),
        hits: Vec::with_capacity(ranked.len()),
        misses: Vec::with_capacity(ranked.len()),
        total_ground_truths,
        image_count,
    };

    for ranked_pred in &ranked {
        let gts = ground_truths_by_image[ranked_pred.image_idx].as_ref();
        let hit_mask = &mut hit_masks[ranked_pred.image_idx];

        match replay_prediction(&ranked_pred.prediction.bbox, gts, hit_mask, iou_threshold) {
            Outcome::Hit(new_hits) => n_hits += new_hits,
            Outcome::Miss => n_misses += 1,
        }

        curve.hits.push(n_hits);
        curve.misses.push(n_misses);
        curve
            .sensitivities
            .push(n_hits as f64 / total_ground_truths as f64);
        curve.fp_per_image.push(n_misses as f64 / image_count as f64);
    }

    debug!(hits = n_hits, misses = n_misses, "FROC curve complete");

    Ok(curve)
}

/// Pool every prediction and order the pool by descending score.
///
/// `sort_by` is stable, which keeps ties in corpus order. Scores are
/// compared numerically, so `-0.0` and `0.0` tie. NaN is rejected earlier.
fn rank_predictions<P>(predictions_by_image: &[P]) -> Vec<RankedPrediction<'_>>
where
    P: AsRef<[ScoredBox]>,
{
    let mut ranked: Vec<RankedPrediction<'_>> = predictions_by_image
        .iter()
        .enumerate()
        .flat_map(|(image_idx, preds)| {
            preds
                .as_ref()
                .iter()
                .map(move |prediction| RankedPrediction { image_idx, prediction })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.prediction
            .score
            .partial_cmp(&a.prediction.score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Match one prediction against the ground truths of its image.
fn replay_prediction(
    bbox: &BoundingBox,
    ground_truths: &[BoundingBox],
    hit_mask: &mut [bool],
    iou_threshold: f64,
) -> Outcome {
    let overlaps = calculate_iou(bbox, ground_truths);

    match max_overlap(&overlaps) {
        Some(best) if best >= iou_threshold => {
            let mut new_hits = 0;
            for (overlap, hit) in overlaps.iter().zip(hit_mask.iter_mut()) {
                if *overlap >= iou_threshold && !*hit {
                    *hit = true;
                    new_hits += 1;
                }
            }
            Outcome::Hit(new_hits)
        }
        _ => Outcome::Miss,
    }
}

fn validate_inputs<P, G>(
    predictions_by_image: &[P],
    ground_truths_by_image: &[G],
    iou_threshold: f64,
) -> Result<()>
where
    P: AsRef<[ScoredBox]>,
    G: AsRef<[BoundingBox]>,
{
    if predictions_by_image.len() != ground_truths_by_image.len() {
        return Err(FrocEvalError::InvalidInput(format!(
            "predictions cover {} images but ground truths cover {}",
            predictions_by_image.len(),
            ground_truths_by_image.len()
        )));
    }

    if !(0.0..=1.0).contains(&iou_threshold) {
        return Err(FrocEvalError::InvalidThreshold(format!(
            "IoU threshold must be between 0.0 and 1.0, got {}",
            iou_threshold
        )));
    }

    for (image_idx, preds) in predictions_by_image.iter().enumerate() {
        for pred in preds.as_ref() {
            if pred.score.is_nan() {
                return Err(FrocEvalError::InvalidInput(format!(
                    "prediction on image {} has a NaN score",
                    image_idx
                )));
            }
            pred.bbox.validate()?;
        }
    }

    for gt in ground_truths_by_image.iter().flat_map(|gts| gts.as_ref()) {
        gt.validate()?;
    }

    Ok(())
}
