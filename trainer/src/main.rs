mod config;

use std::io;

use log::info;
use machine_learning::{Dataset, LogisticRegression};

use config::TrainerConfig;

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainerConfig::from_env()?;

    let dataset = Dataset::breast_cancer()?;
    info!(
        "loaded {} samples with {} features",
        dataset.len(),
        dataset.n_features()
    );

    let (train, test) = dataset.train_test_split(config.test_size(), config.seed())?;
    info!(
        "split into {} training and {} test samples (seed {})",
        train.len(),
        test.len(),
        config.seed()
    );

    let (model, report) = LogisticRegression::fit(&train, config.training())?;
    info!(
        "fit finished after {} iterations with loss {:.6}",
        report.iterations, report.loss
    );

    model.save(config.model_path())?;
    println!("Model trained and saved as {}", config.model_path().display());
    Ok(())
}
