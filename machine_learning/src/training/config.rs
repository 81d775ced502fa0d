use std::num::NonZeroUsize;

use crate::{MlErr, Result};

pub const DEFAULT_MAX_ITER: usize = 5000;
pub const DEFAULT_TOL: f64 = 1e-4;
pub const DEFAULT_C: f64 = 1.0;

/// The iterative solver used to minimize the regularized log loss.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SolverConfig {
    /// Damped Newton steps, solved with a Cholesky factorization of the Hessian.
    #[default]
    Newton,
    Adam { lr: f64, b1: f64, b2: f64, eps: f64 },
    GradientDescent { lr: f64 },
}

impl SolverConfig {
    /// Adam with the usual moment decay rates.
    pub fn adam(lr: f64) -> Self {
        Self::Adam {
            lr,
            b1: 0.9,
            b2: 0.999,
            eps: 1e-8,
        }
    }

    pub fn gradient_descent(lr: f64) -> Self {
        Self::GradientDescent { lr }
    }

    /// The step size of first order solvers, `None` for `Newton`.
    pub fn learning_rate(&self) -> Option<f64> {
        match *self {
            Self::Newton => None,
            Self::Adam { lr, .. } | Self::GradientDescent { lr } => Some(lr),
        }
    }
}

/// Immutable settings of a logistic regression fit.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    max_iter: NonZeroUsize,
    tol: f64,
    c: f64,
    solver: SolverConfig,
}

impl TrainingConfig {
    /// Creates a new training configuration.
    ///
    /// # Args
    /// * `max_iter` - Upper bound on solver iterations; reaching it is not an error.
    /// * `tol` - The solver stops once no gradient component exceeds this in absolute value.
    /// * `c` - Inverse of the L2 regularization strength.
    /// * `solver` - The optimization algorithm.
    ///
    /// # Returns
    /// A `TrainingConfig` instance or an error if `tol` or `c` are out of range.
    pub fn new(max_iter: NonZeroUsize, tol: f64, c: f64, solver: SolverConfig) -> Result<Self> {
        if !(tol.is_finite() && tol >= 0.0) {
            return Err(MlErr::InvalidConfig(format!(
                "tol must be a non negative number, got {tol}"
            )));
        }

        if !(c.is_finite() && c > 0.0) {
            return Err(MlErr::InvalidConfig(format!(
                "C must be a positive number, got {c}"
            )));
        }

        if let Some(lr) = solver.learning_rate() {
            if !(lr.is_finite() && lr > 0.0) {
                return Err(MlErr::InvalidConfig(format!(
                    "learning rate must be a positive number, got {lr}"
                )));
            }
        }

        Ok(Self {
            max_iter,
            tol,
            c,
            solver,
        })
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter.get()
    }

    pub fn tol(&self) -> f64 {
        self.tol
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn solver(&self) -> SolverConfig {
        self.solver
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_iter: NonZeroUsize::new(DEFAULT_MAX_ITER).unwrap_or(NonZeroUsize::MIN),
            tol: DEFAULT_TOL,
            c: DEFAULT_C,
            solver: SolverConfig::default(),
        }
    }
}
