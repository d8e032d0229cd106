//! Metric building blocks.

pub mod iou;
pub mod recall;

pub use iou::{calculate_iou, calculate_iou_pair, max_overlap};
pub use recall::mask_recall;
