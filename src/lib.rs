//! # froc-eval
//!
//! A Rust library for FROC (Free Response Operating Characteristic)
//! evaluation of object detectors.
//!
//! FROC analysis plots sensitivity (the fraction of ground-truth boxes found)
//! against the average number of false positives per image. It is the usual
//! yardstick when an image may contain any number of findings, e.g. lesion
//! detection in medical images.
//!
//! This library provides:
//! - **IoU** between a box and every ground truth of an image
//! - **FROC curve** construction by global greedy matching in descending
//!   confidence order
//! - **Operating points**: sensitivity sampled at fixed false-positive budgets
//! - **Reporting**: a per-corpus summary with a mean over leading budgets
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use froc_eval::{evaluate, BoundingBox, FrocConfig, ImageRecord, ScoredBox};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut records = BTreeMap::new();
//! records.insert(
//!     "scan_001".to_string(),
//!     ImageRecord::new(
//!         vec![ScoredBox::new(10.0, 10.0, 29.0, 29.0, 0.9)],
//!         vec![BoundingBox::new(10.0, 10.0, 29.0, 29.0)],
//!     ),
//! );
//!
//! let report = evaluate(&records, &FrocConfig::default())?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! ## Box convention
//!
//! Boxes are `(xmin, ymin, xmax, ymax)` with inclusive pixel coordinates, so
//! a box's width is `xmax - xmin + 1`.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod froc;
pub mod metrics;
pub mod sampler;
pub mod stats;
pub mod types;

// Re-export commonly used types and functions
pub use config::FrocConfig;
pub use error::{FrocEvalError, Result};
pub use evaluator::{evaluate, evaluate_froc, FrocReport};
pub use froc::build_froc;
pub use sampler::sample;
pub use stats::CorpusStats;
pub use types::{
    BoundingBox, FrocCurve, ImageRecord, OperatingPoint, OperatingPointTable, ScoredBox,
};
