use ndarray::{Array1, ArrayView1, ArrayView2};

use super::sigmoid;
use crate::{MlErr, Result, dataset::Dataset};

/// A fitted binary logistic regression: a weight per feature, a bias, and the two class labels
/// it decides between.
///
/// The decision value of a sample `x` is `coef · x + intercept`; positive values are labeled
/// `classes[1]`, the rest `classes[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    coef: Array1<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LogisticRegression {
    /// Creates a new `LogisticRegression` from already fitted parameters.
    ///
    /// # Arguments
    /// * `coef` - One weight per input feature.
    /// * `intercept` - The bias term.
    /// * `classes` - The negative and positive class labels, in that order.
    pub fn new(coef: Array1<f64>, intercept: f64, classes: [i64; 2]) -> Self {
        Self {
            coef,
            intercept,
            classes,
        }
    }

    /// The amount of features every input row must have.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    #[inline]
    pub fn coef(&self) -> ArrayView1<'_, f64> {
        self.coef.view()
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    #[inline]
    pub fn classes(&self) -> [i64; 2] {
        self.classes
    }

    /// Computes the signed distance of each row of `x` to the decision boundary.
    ///
    /// # Arguments
    /// * `x` - The input rows, of shape `(samples, n_features)`.
    ///
    /// # Returns
    /// One decision value per row, or an error if the amount of columns is not `n_features`.
    pub fn decision_function(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features() {
            return Err(MlErr::FeatureMismatch {
                got: x.ncols(),
                expected: self.n_features(),
            });
        }

        Ok(x.dot(&self.coef) + self.intercept)
    }

    /// The probability of each row of `x` belonging to `classes[1]`.
    pub fn predict_proba(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        Ok(self.decision_function(x)?.mapv_into(sigmoid))
    }

    /// Labels each row of `x` with one of the two classes.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<i64>> {
        let [negative, positive] = self.classes;
        let z = self.decision_function(x)?;
        Ok(z.mapv(|z| if z > 0.0 { positive } else { negative }))
    }

    /// The fraction of samples of `dataset` this model labels correctly.
    pub fn score(&self, dataset: &Dataset) -> Result<f64> {
        let y_pred = self.predict(dataset.x())?;
        let hits = y_pred
            .iter()
            .zip(dataset.y())
            .filter(|(pred, y)| pred == y)
            .count();

        Ok(hits as f64 / dataset.len() as f64)
    }
}
