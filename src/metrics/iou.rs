//! Intersection over Union (IoU) calculation.

use crate::types::BoundingBox;

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// Widths and heights use the inclusive-pixel convention (`max - min + 1`)
/// and are clamped at zero, so disjoint boxes have an intersection of 0.
///
/// # Example
///
/// ```
/// use froc_eval::metrics::iou::calculate_iou_pair;
/// use froc_eval::types::BoundingBox;
///
/// let bbox1 = BoundingBox::new(0.0, 0.0, 9.0, 9.0);
/// let bbox2 = BoundingBox::new(5.0, 5.0, 14.0, 14.0);
/// let iou = calculate_iou_pair(&bbox1, &bbox2);
/// assert!(iou > 0.0 && iou < 1.0);
/// ```
pub fn calculate_iou_pair(bbox1: &BoundingBox, bbox2: &BoundingBox) -> f64 {
    let ixmin = bbox1.xmin.max(bbox2.xmin);
    let iymin = bbox1.ymin.max(bbox2.ymin);
    let ixmax = bbox1.xmax.min(bbox2.xmax);
    let iymax = bbox1.ymax.min(bbox2.ymax);

    let iw = (ixmax - ixmin + 1.0).max(0.0);
    let ih = (iymax - iymin + 1.0).max(0.0);
    let intersection_area = iw * ih;

    let union_area = bbox1.area() + bbox2.area() - intersection_area;

    intersection_area / union_area
}

/// Calculate the IoU of one box against every ground truth of an image.
///
/// Returns one overlap per ground truth, in the same order. An empty
/// ground-truth set yields an empty vector.
///
/// # Example
///
/// ```
/// use froc_eval::metrics::iou::calculate_iou;
/// use froc_eval::types::BoundingBox;
///
/// let pred = BoundingBox::new(0.0, 0.0, 9.0, 9.0);
/// let gts = vec![
///     BoundingBox::new(0.0, 0.0, 9.0, 9.0),
///     BoundingBox::new(50.0, 50.0, 59.0, 59.0),
/// ];
/// assert_eq!(calculate_iou(&pred, &gts), vec![1.0, 0.0]);
/// ```
pub fn calculate_iou(bbox: &BoundingBox, ground_truths: &[BoundingBox]) -> Vec<f64> {
    ground_truths
        .iter()
        .map(|gt| calculate_iou_pair(bbox, gt))
        .collect()
}

/// Largest value of an overlap vector, `None` when it is empty.
pub fn max_overlap(overlaps: &[f64]) -> Option<f64> {
    overlaps.iter().copied().reduce(f64::max)
}
