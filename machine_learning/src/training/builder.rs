use super::{ModelTrainer, NewtonTrainer, SolverConfig, Trainer, TrainingConfig};
use crate::{
    arch::loss::LogLoss,
    optimization::{Adam, GradientDescent},
};

/// Builds `Trainer`s given a configuration.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Trainer` following a config.
    ///
    /// # Arguments
    /// * `config` - The configuration for the trainer.
    /// * `n_features` - The amount of input features of the model to fit.
    pub fn build(&self, config: &TrainingConfig, n_features: usize) -> Box<dyn Trainer> {
        let n_params = n_features + 1;
        let (max_iter, tol, c) = (config.max_iter(), config.tol(), config.c());

        match config.solver() {
            SolverConfig::Newton => Box::new(NewtonTrainer::new(max_iter, tol, c)),
            SolverConfig::Adam { lr, b1, b2, eps } => {
                let optimizer = Adam::new(n_params, lr, b1, b2, eps);
                Box::new(ModelTrainer::new(optimizer, LogLoss, max_iter, tol, c))
            }
            SolverConfig::GradientDescent { lr } => {
                let optimizer = GradientDescent::new(lr);
                Box::new(ModelTrainer::new(optimizer, LogLoss, max_iter, tol, c))
            }
        }
    }
}
