use std::num::NonZeroUsize;

use machine_learning::{
    Dataset, LogisticRegression, MlErr,
    training::{SolverConfig, TrainingConfig},
};
use ndarray::Array2;

const SEED: u64 = 42;
const TEST_SIZE: f64 = 0.2;

fn fit_default() -> (Dataset, LogisticRegression) {
    let dataset = Dataset::breast_cancer().unwrap();
    let (train, _test) = dataset.train_test_split(TEST_SIZE, SEED).unwrap();
    let (model, _) = LogisticRegression::fit(&train, &TrainingConfig::default()).unwrap();
    (train, model)
}

#[test]
fn bundled_dataset_trains_an_accurate_model() {
    let (train, model) = fit_default();

    assert_eq!(train.len(), 455);
    assert_eq!(model.n_features(), 30);
    assert_eq!(model.classes(), [0, 1]);

    let accuracy = model.score(&train).unwrap();
    assert!(accuracy >= 0.9, "training accuracy {accuracy}");
}

#[test]
fn default_fit_converges_with_small_raw_weights() {
    let dataset = Dataset::breast_cancer().unwrap();
    let (train, _) = dataset.train_test_split(TEST_SIZE, SEED).unwrap();
    let (model, report) = LogisticRegression::fit(&train, &TrainingConfig::default()).unwrap();

    assert!(report.converged, "{report:?}");
    assert!(report.iterations < 50, "{report:?}");

    // penalizing standardized weights instead lets the narrow columns reach the hundreds
    let largest = model.coef().iter().fold(0.0_f64, |m, w| m.max(w.abs()));
    assert!(largest < 10.0, "largest coefficient {largest}");
}

#[test]
fn gradient_descent_also_fits_the_bundled_dataset() {
    let dataset = Dataset::breast_cancer().unwrap();
    let (train, _) = dataset.train_test_split(TEST_SIZE, SEED).unwrap();

    let config = TrainingConfig::new(
        NonZeroUsize::new(2000).unwrap(),
        1e-4,
        1.0,
        SolverConfig::gradient_descent(0.5),
    )
    .unwrap();

    let (model, report) = LogisticRegression::fit(&train, &config).unwrap();
    assert!(report.iterations <= 2000);
    assert!(model.score(&train).unwrap() >= 0.9);
}

#[test]
fn predictions_are_idempotent() {
    let (train, model) = fit_default();

    let first = model.predict(train.x()).unwrap();
    let second = model.predict(train.x()).unwrap();
    assert_eq!(first, second);
    assert!(first.iter().all(|label| *label == 0 || *label == 1));
}

#[test]
fn saved_model_predicts_like_the_fitted_one() {
    let (train, model) = fit_default();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.safetensors");
    model.save(&path).unwrap();

    let loaded = LogisticRegression::load(&path).unwrap();
    assert_eq!(loaded, model);
    assert_eq!(
        loaded.predict(train.x()).unwrap(),
        model.predict(train.x()).unwrap()
    );
}

#[test]
fn wrong_feature_count_is_rejected() {
    let (_, model) = fit_default();

    let row = Array2::<f64>::zeros((1, 3));
    let err = model.predict(row.view()).unwrap_err();

    assert!(matches!(
        err,
        MlErr::FeatureMismatch {
            got: 3,
            expected: 30
        }
    ));
    assert_eq!(
        err.to_string(),
        "X has 3 features, but LogisticRegression is expecting 30 features as input."
    );
}
