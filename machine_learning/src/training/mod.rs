mod builder;
mod config;
mod model_trainer;
mod newton_trainer;
mod problem;
mod scaler;
mod trainer;

pub use builder::TrainerBuilder;
pub use config::{DEFAULT_C, DEFAULT_MAX_ITER, DEFAULT_TOL, SolverConfig, TrainingConfig};
pub use model_trainer::ModelTrainer;
pub use newton_trainer::NewtonTrainer;
pub use scaler::Standardizer;
pub use trainer::{FitReport, Trainer};

use crate::{Result, arch::LogisticRegression, dataset::Dataset};

impl LogisticRegression {
    /// Fits a new model on `dataset` following `config`.
    ///
    /// # Arguments
    /// * `dataset` - The training samples, which must contain exactly two classes.
    /// * `config` - The solver and its stopping criteria.
    ///
    /// # Returns
    /// The fitted model along with a report of how the solver went.
    pub fn fit(dataset: &Dataset, config: &TrainingConfig) -> Result<(Self, FitReport)> {
        let mut trainer = TrainerBuilder::new().build(config, dataset.n_features());
        trainer.fit(dataset)
    }
}
