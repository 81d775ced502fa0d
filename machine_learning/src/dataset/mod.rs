mod breast_cancer;
mod split;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result};

/// An in-memory tabular dataset: one row per sample, one column per feature, and an integer
/// class label per sample.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<i64>,
    feature_names: Vec<String>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, of shape `(samples, features)`.
    /// * `y` - The class label of each sample.
    /// * `feature_names` - The name of each column of `x`.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the sizes don't match or there are no samples.
    pub fn new(x: Array2<f64>, y: Array1<i64>, feature_names: Vec<String>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "dataset labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if feature_names.len() != x.ncols() {
            return Err(MlErr::SizeMismatch {
                what: "dataset feature names",
                got: feature_names.len(),
                expected: x.ncols(),
            });
        }

        if x.nrows() == 0 {
            return Err(MlErr::EmptyDataset);
        }

        Ok(Self {
            x,
            y,
            feature_names,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    #[inline]
    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    #[inline]
    pub fn y(&self) -> ArrayView1<'_, i64> {
        self.y.view()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// The sorted distinct labels present in the dataset.
    pub fn classes(&self) -> Vec<i64> {
        let mut classes = self.y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Builds a new dataset out of the rows at `indices`, in that order.
    fn select(&self, indices: &[usize]) -> Result<Self> {
        Self::new(
            self.x.select(Axis(0), indices),
            self.y.select(Axis(0), indices),
            self.feature_names.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    #[test]
    fn dataset_basic() {
        let ds = Dataset::new(array![[1.0, 2.0], [3.0, 4.0]], array![1, 0], names(2)).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(!ds.is_empty());
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.classes(), vec![0, 1]);
    }

    #[test]
    fn dataset_rejects_label_mismatch() {
        let res = Dataset::new(array![[1.0, 2.0], [3.0, 4.0]], array![1], names(2));
        assert!(matches!(
            res,
            Err(MlErr::SizeMismatch {
                got: 1,
                expected: 2,
                ..
            })
        ));
    }

    #[test]
    fn dataset_rejects_empty() {
        let res = Dataset::new(Array2::zeros((0, 2)), Array1::zeros(0), names(2));
        assert!(matches!(res, Err(MlErr::EmptyDataset)));
    }

    #[test]
    fn select_keeps_row_order() {
        let ds = Dataset::new(
            array![[0.0], [1.0], [2.0]],
            array![0, 1, 0],
            names(1),
        )
        .unwrap();

        let picked = ds.select(&[2, 0]).unwrap();
        assert_eq!(picked.x(), array![[2.0], [0.0]]);
        assert_eq!(picked.y(), array![0, 0]);
    }
}
