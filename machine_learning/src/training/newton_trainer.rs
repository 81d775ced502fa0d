use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use ndarray::Array2;

use super::{
    FitReport, Trainer,
    problem::{Problem, max_abs},
};
use crate::{
    MlErr, Result,
    arch::{LogisticRegression, loss::LogLoss},
    dataset::Dataset,
};

/// Sufficient decrease constant of the backtracking line search.
const ARMIJO: f64 = 1e-4;

/// Relative change of the objective treated as rounding noise.
const LOSS_NOISE: f64 = 16.0 * f64::EPSILON;

/// Step halvings tried before giving up on an iteration.
const MAX_HALVINGS: usize = 50;

/// A trainer taking damped Newton steps on the regularized log loss.
///
/// Every iteration solves `H d = g` through a Cholesky factorization of the Hessian and
/// backtracks along `-d` until the objective decreases enough.
pub struct NewtonTrainer {
    max_iter: usize,
    tol: f64,
    c: f64,
}

impl NewtonTrainer {
    /// Returns a new `NewtonTrainer`.
    ///
    /// # Arguments
    /// * `max_iter` - The maximum amount of Newton steps.
    /// * `tol` - Convergence threshold on the largest absolute gradient component.
    /// * `c` - Inverse of the L2 regularization strength.
    pub fn new(max_iter: usize, tol: f64, c: f64) -> Self {
        Self { max_iter, tol, c }
    }
}

impl Trainer for NewtonTrainer {
    fn fit(&mut self, dataset: &Dataset) -> Result<(LogisticRegression, FitReport)> {
        let problem = Problem::new(dataset, self.c)?;
        let n_params = problem.n_params();

        let mut params = vec![0.0; n_params];
        let mut grad = vec![0.0; n_params];
        let mut trial = vec![0.0; n_params];
        let mut trial_grad = vec![0.0; n_params];
        let mut iterations = 0;
        let mut converged = false;

        let mut loss = problem.objective(&LogLoss, &params, &mut grad);
        while iterations < self.max_iter {
            if max_abs(&grad) <= self.tol {
                converged = true;
                break;
            }

            let direction = newton_direction(problem.log_loss_hessian(&params), &grad)?;
            let slope: f64 = grad.iter().zip(&direction).map(|(g, d)| g * d).sum();

            let mut step = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_HALVINGS {
                for ((t, p), d) in trial.iter_mut().zip(&params).zip(&direction) {
                    *t = p - step * d;
                }

                let trial_loss = problem.objective(&LogLoss, &trial, &mut trial_grad);
                let sufficient = trial_loss <= loss - ARMIJO * step * slope;
                // differences below rounding noise are judged by the gradient instead
                let flat = (trial_loss - loss).abs() <= LOSS_NOISE * loss.abs()
                    && max_abs(&trial_grad) <= max_abs(&grad);

                if sufficient || flat {
                    accepted = Some(trial_loss);
                    break;
                }
                step *= 0.5;
            }

            let Some(trial_loss) = accepted else {
                debug!("line search stalled at iteration {iterations}, loss={loss:.6}");
                break;
            };

            std::mem::swap(&mut params, &mut trial);
            std::mem::swap(&mut grad, &mut trial_grad);
            loss = trial_loss;
            iterations += 1;

            debug!(
                "iteration {iterations}: loss={loss:.6} step={step} max|grad|={:.3e}",
                max_abs(&grad)
            );
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

/// Solves `hessian * d = grad` for `d`.
fn newton_direction(hessian: Array2<f64>, grad: &[f64]) -> Result<Vec<f64>> {
    let n = grad.len();
    if hessian.dim() != (n, n) {
        return Err(MlErr::SizeMismatch {
            what: "hessian",
            got: hessian.nrows(),
            expected: n,
        });
    }

    // row major into column major, which is the same matrix for a symmetric hessian
    let hessian = DMatrix::from_iterator(n, n, hessian.iter().copied());
    let cholesky = hessian
        .cholesky()
        .ok_or_else(|| MlErr::Solver("the Hessian is not positive definite".to_string()))?;

    let direction = cholesky.solve(&DVector::from_column_slice(grad));
    Ok(direction.iter().copied().collect())
}
