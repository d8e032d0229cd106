//! Sampling a FROC curve at fixed false-positive-per-image budgets.

use crate::error::{FrocEvalError, Result};
use crate::types::{FrocCurve, OperatingPoint, OperatingPointTable};

/// Read the sensitivity of `curve` at each requested budget.
///
/// Budgets up to the largest observed false-positives-per-image value are
/// linearly interpolated between the bracketing curve points. When several
/// points share an fp value, the first of them is used. Budgets below the
/// first point interpolate from the origin (no predictions kept). Budgets
/// beyond the curve saturate at its final sensitivity.
///
/// The returned table keeps the order of `fp_budgets`.
///
/// # Errors
///
/// - [`FrocEvalError::InsufficientData`] if the curve is empty, or if a budget
///   needs interpolation and the curve has fewer than two distinct fp values.
/// - [`FrocEvalError::InvalidInput`] for negative or non-finite budgets.
///
/// # Example
///
/// ```
/// use froc_eval::sampler::sample;
/// use froc_eval::types::FrocCurve;
///
/// let curve = FrocCurve {
///     sensitivities: vec![0.5, 0.5],
///     fp_per_image: vec![0.0, 0.5],
///     hits: vec![1, 1],
///     misses: vec![0, 1],
///     total_ground_truths: 2,
///     image_count: 2,
/// };
///
/// let table = sample(&curve, &[0.5, 10.0]).unwrap();
/// assert_eq!(table.sensitivities(), vec![0.5, 0.5]);
/// assert!(table.points[1].saturated);
/// ```
pub fn sample(curve: &FrocCurve, fp_budgets: &[f64]) -> Result<OperatingPointTable> {
    let (Some(max_fp), Some(final_sensitivity)) =
        (curve.max_fp_per_image(), curve.final_sensitivity())
    else {
        return Err(FrocEvalError::InsufficientData(
            "FROC curve is empty, no predictions were made".to_string(),
        ));
    };

    if curve.fp_per_image.len() != curve.sensitivities.len() {
        return Err(FrocEvalError::InvalidInput(format!(
            "curve has {} fp values but {} sensitivities",
            curve.fp_per_image.len(),
            curve.sensitivities.len()
        )));
    }

    let points = fp_budgets
        .iter()
        .map(|&budget| {
            validate_budget(budget)?;

            if budget > max_fp {
                return Ok(OperatingPoint {
                    fp_per_image: budget,
                    sensitivity: final_sensitivity,
                    saturated: true,
                });
            }

            if !has_distinct_fp_values(curve) {
                return Err(FrocEvalError::InsufficientData(format!(
                    "cannot interpolate at {} FP/image: curve has a single fp value",
                    budget
                )));
            }

            Ok(OperatingPoint {
                fp_per_image: budget,
                sensitivity: interpolate(&curve.fp_per_image, &curve.sensitivities, budget),
                saturated: false,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(OperatingPointTable { points })
}

/// Piecewise-linear interpolation over a non-decreasing `xs`.
///
/// `x` must not exceed the last element of `xs`.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    // First index with xs[hi] >= x.
    let hi = xs.partition_point(|&v| v < x);

    let (x_lo, y_lo) = match hi {
        0 if xs[0] == x => return ys[0],
        0 => (0.0, 0.0),
        _ => (xs[hi - 1], ys[hi - 1]),
    };
    let (x_hi, y_hi) = (xs[hi], ys[hi]);

    y_lo + (y_hi - y_lo) * (x - x_lo) / (x_hi - x_lo)
}

fn has_distinct_fp_values(curve: &FrocCurve) -> bool {
    match (curve.fp_per_image.first(), curve.fp_per_image.last()) {
        (Some(first), Some(last)) => first < last,
        _ => false,
    }
}

fn validate_budget(budget: f64) -> Result<()> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(FrocEvalError::InvalidInput(format!(
            "false positive budget must be a non-negative number, got {}",
            budget
        )));
    }
    Ok(())
}
