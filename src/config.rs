//! Evaluation parameters and their JSON loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FrocEvalError, Result};

/// Parameters of one FROC evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrocConfig {
    /// Minimum IoU for a prediction to hit a ground truth.
    pub iou_threshold: f64,
    /// False-positives-per-image budgets at which sensitivity is reported.
    pub fp_budgets: Vec<f64>,
    /// How many leading budgets enter the summary mean.
    pub mean_leading: usize,
}

impl Default for FrocConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.5,
            fp_budgets: vec![0.5, 1.0, 2.0, 4.0, 8.0],
            mean_leading: 4,
        }
    }
}

impl FrocConfig {
    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`FrocEvalError::InvalidThreshold`] for an IoU threshold
    /// outside [0, 1] and [`FrocEvalError::InvalidInput`] for negative or
    /// non-finite budgets.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(FrocEvalError::InvalidThreshold(format!(
                "IoU threshold must be between 0.0 and 1.0, got {}",
                self.iou_threshold
            )));
        }

        if let Some(bad) = self
            .fp_budgets
            .iter()
            .find(|b| !b.is_finite() || **b < 0.0)
        {
            return Err(FrocEvalError::InvalidInput(format!(
                "false positive budgets must be non-negative, got {}",
                bad
            )));
        }

        Ok(())
    }

    /// Load a config from a JSON file.
    ///
    /// Missing fields take their default values.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use froc_eval::config::FrocConfig;
    ///
    /// let config = FrocConfig::from_file("froc.json").unwrap();
    /// println!("IoU threshold: {}", config.iou_threshold);
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: FrocConfig = serde_json::from_reader(reader)?;

        config.validate()?;

        Ok(config)
    }

    /// Load a config from a JSON string.
    ///
    /// # Example
    ///
    /// ```
    /// use froc_eval::config::FrocConfig;
    ///
    /// let config = FrocConfig::from_json_str(r#"{ "fp_budgets": [0.125, 0.25] }"#).unwrap();
    /// assert_eq!(config.iou_threshold, 0.5);
    /// assert_eq!(config.fp_budgets, vec![0.125, 0.25]);
    /// ```
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let config: FrocConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }
}
