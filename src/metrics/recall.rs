//! Pixel-level recall of a binary segmentation output.

use crate::error::{FrocEvalError, Result};

/// Recall of a logit map against a binary target mask.
///
/// A logit `>= 0` counts as a positive prediction. The result is the number
/// of positive targets that were also predicted positive, divided by the
/// number of positive targets.
///
/// # Errors
///
/// Returns [`FrocEvalError::InvalidInput`] when the slices differ in length
/// and [`FrocEvalError::DegenerateInput`] when the target has no positives.
///
/// # Example
///
/// ```
/// use froc_eval::metrics::recall::mask_recall;
///
/// let logits = [1.2, -0.3, 0.0, -2.0];
/// let target = [true, true, true, false];
/// let recall = mask_recall(&logits, &target).unwrap();
/// assert!((recall - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn mask_recall(logits: &[f32], target: &[bool]) -> Result<f64> {
    if logits.len() != target.len() {
        return Err(FrocEvalError::InvalidInput(format!(
            "logits length {} != target length {}",
            logits.len(),
            target.len()
        )));
    }

    let positives = target.iter().filter(|&&t| t).count();
    if positives == 0 {
        return Err(FrocEvalError::DegenerateInput(
            "target mask has no positive pixels".to_string(),
        ));
    }

    let correct = logits
        .iter()
        .zip(target)
        .filter(|&(&logit, &t)| t && logit >= 0.0)
        .count();

    Ok(correct as f64 / positives as f64)
}
