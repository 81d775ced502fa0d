use std::{env, num::NonZeroUsize, path::PathBuf, str::FromStr};

use machine_learning::{
    MlErr, Result,
    training::{DEFAULT_C, DEFAULT_MAX_ITER, DEFAULT_TOL, SolverConfig, TrainingConfig},
};

const DEFAULT_MODEL_PATH: &str = "model.safetensors";
const DEFAULT_SEED: u64 = 42;
const DEFAULT_TEST_SIZE: f64 = 0.2;
const DEFAULT_ADAM_LR: f64 = 0.05;
const DEFAULT_GD_LR: f64 = 0.5;

/// Immutable settings of a training run, read from the environment.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    model_path: PathBuf,
    seed: u64,
    test_size: f64,
    training: TrainingConfig,
}

impl TrainerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Recognized variables are `MODEL_PATH`, `SEED`, `TEST_SIZE`, `MAX_ITER`, `TOL`,
    /// `SOLVER` (`newton`, `adam` or `gd`) and `LEARNING_RATE`, which only applies to `adam` and
    /// `gd`. Unset variables take their defaults.
    ///
    /// # Returns
    /// The configuration, or an error if a variable is set to something unparseable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reading the variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_path = lookup("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        let seed = parse_var(&lookup, "SEED")?.unwrap_or(DEFAULT_SEED);
        let test_size = parse_var(&lookup, "TEST_SIZE")?.unwrap_or(DEFAULT_TEST_SIZE);
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(MlErr::InvalidConfig(format!(
                "TEST_SIZE must lie strictly between 0 and 1, got {test_size}"
            )));
        }

        let max_iter = parse_var::<usize, _>(&lookup, "MAX_ITER")?.unwrap_or(DEFAULT_MAX_ITER);
        let max_iter = NonZeroUsize::new(max_iter)
            .ok_or_else(|| MlErr::InvalidConfig("MAX_ITER must be positive".to_string()))?;
        let tol = parse_var(&lookup, "TOL")?.unwrap_or(DEFAULT_TOL);
        let lr = parse_var::<f64, _>(&lookup, "LEARNING_RATE")?;

        let solver = match lookup("SOLVER").as_deref().map(str::trim) {
            None | Some("newton") => {
                if lr.is_some() {
                    return Err(MlErr::InvalidConfig(
                        "LEARNING_RATE does not apply to the newton solver".to_string(),
                    ));
                }
                SolverConfig::Newton
            }
            Some("adam") => SolverConfig::adam(lr.unwrap_or(DEFAULT_ADAM_LR)),
            Some("gd") => SolverConfig::gradient_descent(lr.unwrap_or(DEFAULT_GD_LR)),
            Some(other) => {
                return Err(MlErr::InvalidConfig(format!(
                    "SOLVER must be 'newton', 'adam' or 'gd', got '{other}'"
                )));
            }
        };

        Ok(Self {
            model_path,
            seed,
            test_size,
            training: TrainingConfig::new(max_iter, tol, DEFAULT_C, solver)?,
        })
    }

    pub fn model_path(&self) -> &PathBuf {
        &self.model_path
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn test_size(&self) -> f64 {
        self.test_size
    }

    pub fn training(&self) -> &TrainingConfig {
        &self.training
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| MlErr::InvalidConfig(format!("{key}='{raw}': {e}")))
        })
        .transpose()
}
