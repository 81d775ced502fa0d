//! The HTTP routes of the prediction service.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use log::debug;
use machine_learning::LogisticRegression;
use serde_json::{Value, json};

use crate::{
    error::{ApiErr, Result},
    features::to_row,
};

const STATUS_READY: &str = "API lista";
const FEATURES_KEY: &str = "features";

/// State shared by every request: the model loaded at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    model: Arc<LogisticRegression>,
}

impl AppState {
    pub fn new(model: LogisticRegression) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }
}

/// Builds the service's router.
///
/// # Arguments
/// * `state` - The state every handler gets access to.
///
/// # Returns
/// A `Router` serving `GET /` and `POST /predict`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn status() -> Json<Value> {
    Json(json!({ "status": STATUS_READY }))
}

/// Labels the feature vector in the body's `features` list.
///
/// The body is read raw so that any JSON value is accepted and validated here, the content
/// type is not checked.
async fn predict(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>> {
    debug!("predict request of {} bytes", body.len());

    let data: Value = serde_json::from_slice(&body)?;

    // scalar bodies can't be searched for a key at all, unlike lists and strings
    if let Value::Null | Value::Bool(_) | Value::Number(_) = data {
        return Err(ApiErr::Internal(format!(
            "the JSON body can't hold a '{FEATURES_KEY}' key, got {data}"
        )));
    }

    let Some(features) = data.get(FEATURES_KEY) else {
        return Err(ApiErr::BadRequest(format!(
            "Missing key '{FEATURES_KEY}' in the JSON"
        )));
    };

    let Value::Array(features) = features else {
        return Err(ApiErr::BadRequest(format!(
            "'{FEATURES_KEY}' must be a list"
        )));
    };

    let x = to_row(features)?;
    let labels = state.model().predict(x.view())?;
    let prediction = labels
        .first()
        .copied()
        .ok_or_else(|| ApiErr::Internal("the model returned no prediction".to_string()))?;

    debug!("predicted {prediction}");
    Ok(Json(json!({ "Prediction": prediction })))
}
