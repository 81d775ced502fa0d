//! The Breast Cancer Wisconsin (Diagnostic) dataset.
//!
//! 569 samples of 30 numeric features computed from digitized images of fine needle aspirates of
//! breast masses: the mean, standard error and "worst" value of ten cell nucleus measurements.
//! Targets are `0` (malignant) and `1` (benign).

use ndarray::{Array1, Array2};

use super::Dataset;
use crate::{MlErr, Result};

const BREAST_CANCER_CSV: &str = include_str!("../../data/breast_cancer.csv");

/// The name of the label column, which must be the last one.
const TARGET_COLUMN: &str = "target";

impl Dataset {
    /// Loads the bundled Breast Cancer Wisconsin (Diagnostic) dataset.
    ///
    /// # Returns
    /// The full dataset, or an error if the bundled table is malformed.
    pub fn breast_cancer() -> Result<Self> {
        Self::from_csv(BREAST_CANCER_CSV)
    }

    /// Parses a comma separated table whose first line is a header and whose last column holds
    /// the integer class label.
    ///
    /// # Arguments
    /// * `text` - The whole table.
    ///
    /// # Returns
    /// The parsed dataset or an error pointing at the offending line.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(MlErr::EmptyDataset);
        };

        let mut columns: Vec<String> = header.split(',').map(|s| s.trim().to_string()).collect();
        if columns.pop().as_deref() != Some(TARGET_COLUMN) {
            return Err(MlErr::Csv {
                line: 1,
                msg: format!("the last column must be named '{TARGET_COLUMN}'"),
            });
        }

        let n_features = columns.len();
        let mut xs = Vec::new();
        let mut ys = Vec::new();

        for (line, row) in lines {
            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            if fields.len() != n_features + 1 {
                return Err(MlErr::Csv {
                    line,
                    msg: format!("expected {} fields, got {}", n_features + 1, fields.len()),
                });
            }

            let (features, target) = fields.split_at(n_features);
            for field in features {
                let value = field.parse::<f64>().map_err(|e| MlErr::Csv {
                    line,
                    msg: format!("'{field}': {e}"),
                })?;
                xs.push(value);
            }

            let label = target[0].parse::<i64>().map_err(|e| MlErr::Csv {
                line,
                msg: format!("label '{}': {e}", target[0]),
            })?;
            ys.push(label);
        }

        let x = Array2::from_shape_vec((ys.len(), n_features), xs).map_err(|e| MlErr::Csv {
            line: 0,
            msg: e.to_string(),
        })?;

        Self::new(x, Array1::from_vec(ys), columns)
    }
}
