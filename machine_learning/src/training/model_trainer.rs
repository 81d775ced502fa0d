use log::{debug, warn};

use super::{
    FitReport, Trainer,
    problem::{Problem, max_abs},
};
use crate::{
    Result,
    arch::{LogisticRegression, loss::LossFn},
    dataset::Dataset,
    optimization::Optimizer,
};

/// How often, in iterations, the solver progress is logged.
const LOG_EVERY: usize = 500;

/// A full batch trainer for `LogisticRegression`. Every iteration computes the gradient of the
/// L2 regularized loss over the whole dataset and hands it to the optimizer.
pub struct ModelTrainer<O, L>
where
    O: Optimizer,
    L: LossFn,
{
    optimizer: O,
    loss_fn: L,
    max_iter: usize,
    tol: f64,
    c: f64,
}

impl<O, L> ModelTrainer<O, L>
where
    O: Optimizer,
    L: LossFn,
{
    /// Returns a new `ModelTrainer`.
    ///
    /// # Arguments
    /// * `optimizer` - Dictates how to update the parameters on each gradient calculation.
    /// * `loss_fn` - The data term of the objective.
    /// * `max_iter` - The maximum amount of parameter updates.
    /// * `tol` - Convergence threshold on the largest absolute gradient component.
    /// * `c` - Inverse of the L2 regularization strength.
    pub fn new(optimizer: O, loss_fn: L, max_iter: usize, tol: f64, c: f64) -> Self {
        Self {
            optimizer,
            loss_fn,
            max_iter,
            tol,
            c,
        }
    }
}

impl<O, L> Trainer for ModelTrainer<O, L>
where
    O: Optimizer,
    L: LossFn,
{
    fn fit(&mut self, dataset: &Dataset) -> Result<(LogisticRegression, FitReport)> {
        let problem = Problem::new(dataset, self.c)?;

        let mut params = vec![0.0; problem.n_params()];
        let mut grad = vec![0.0; problem.n_params()];
        let mut iterations = 0;
        let mut converged = false;

        let mut loss = problem.objective(&self.loss_fn, &params, &mut grad);
        while iterations < self.max_iter {
            let max_grad = max_abs(&grad);
            if max_grad <= self.tol {
                converged = true;
                break;
            }

            self.optimizer.update_params(&mut params, &grad)?;
            iterations += 1;
            loss = problem.objective(&self.loss_fn, &params, &mut grad);

            if iterations % LOG_EVERY == 0 {
                debug!("iteration {iterations}: loss={loss:.6} max|grad|={max_grad:.3e}");
            }
        }

        if !converged {
            converged = max_abs(&grad) <= self.tol;
        }

        if !converged {
            warn!(
                "solver did not converge after {iterations} iterations (tol={}), increase max_iter",
                self.tol
            );
        }

        Ok((
            problem.into_model(&params),
            FitReport {
                iterations,
                converged,
                loss,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;
    use crate::{
        MlErr,
        arch::loss::LogLoss,
        optimization::{Adam, GradientDescent},
    };

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    /// Two overlapping 1D clusters, so the unregularized optimum is finite too.
    fn overlapping() -> Dataset {
        let x = array![[0.0], [1.0], [2.0], [2.5], [3.0], [4.0], [5.0], [6.0]];
        let y = array![0, 0, 0, 1, 0, 1, 1, 1];
        Dataset::new(x, y, names(1)).unwrap()
    }

    #[test]
    fn gradient_descent_converges_on_overlapping_classes() {
        let mut trainer = ModelTrainer::new(GradientDescent::new(1.0), LogLoss, 10_000, 1e-8, 1.0);
        let (model, report) = trainer.fit(&overlapping()).unwrap();

        assert!(report.converged);
        assert!(report.iterations < 10_000);
        assert_eq!(model.classes(), [0, 1]);
        // the boundary sits between the clusters
        let y = model.predict(array![[0.5], [5.5]].view()).unwrap();
        assert_eq!(y, array![0, 1]);
    }

    #[test]
    fn adam_and_gradient_descent_agree() {
        let ds = overlapping();
        let mut gd = ModelTrainer::new(GradientDescent::new(1.0), LogLoss, 20_000, 1e-9, 1.0);
        let adam_opt = Adam::new(2, 0.05, 0.9, 0.999, 1e-8);
        let mut adam = ModelTrainer::new(adam_opt, LogLoss, 20_000, 1e-9, 1.0);

        let (a, _) = gd.fit(&ds).unwrap();
        let (b, _) = adam.fit(&ds).unwrap();

        assert!((a.coef()[0] - b.coef()[0]).abs() < 1e-2);
        assert!((a.intercept() - b.intercept()).abs() < 1e-2);
    }

    #[test]
    fn stops_at_max_iter_without_failing() {
        let mut trainer = ModelTrainer::new(GradientDescent::new(1e-6), LogLoss, 3, 0.0, 1.0);
        let (_, report) = trainer.fit(&overlapping()).unwrap();
        assert_eq!(report.iterations, 3);
        assert!(!report.converged);
    }

    #[test]
    fn labels_map_to_sorted_classes() {
        let x = array![[0.0], [1.0], [5.0], [6.0]];
        let y = array![7, 7, 3, 3];
        let ds = Dataset::new(x, y, names(1)).unwrap();

        let mut trainer = ModelTrainer::new(GradientDescent::new(1.0), LogLoss, 2000, 1e-6, 1.0);
        let (model, _) = trainer.fit(&ds).unwrap();

        assert_eq!(model.classes(), [3, 7]);
        assert_eq!(model.predict(array![[0.0], [6.0]].view()).unwrap(), array![7, 3]);
    }

    #[test]
    fn rejects_single_class() {
        let ds = Dataset::new(Array2::zeros((3, 2)), array![1, 1, 1], names(2)).unwrap();
        let mut trainer = ModelTrainer::new(GradientDescent::new(0.1), LogLoss, 10, 1e-4, 1.0);
        assert!(matches!(trainer.fit(&ds), Err(MlErr::ClassCount { got: 1 })));
    }

    #[test]
    fn loss_decreases_from_the_zero_model() {
        let mut trainer = ModelTrainer::new(GradientDescent::new(0.5), LogLoss, 200, 0.0, 1.0);
        let (_, report) = trainer.fit(&overlapping()).unwrap();
        assert!(report.loss < std::f64::consts::LN_2);
    }
}
