use crate::{Result, arch::LogisticRegression, dataset::Dataset};

/// How a fit went.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    /// Parameter updates performed.
    pub iterations: usize,
    /// Whether the gradient dropped below the tolerance before running out of iterations.
    pub converged: bool,
    /// The regularized objective at the returned parameters.
    pub loss: f64,
}

/// Fits logistic regression models.
pub trait Trainer {
    /// Solves for the model that minimizes the regularized log loss over `dataset`.
    ///
    /// # Arguments
    /// * `dataset` - The training samples.
    ///
    /// # Returns
    /// The fitted model and a `FitReport`, or an error if the data can't be fitted.
    fn fit(&mut self, dataset: &Dataset) -> Result<(LogisticRegression, FitReport)>;
}
