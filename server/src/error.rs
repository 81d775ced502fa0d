use std::{
    error::Error,
    fmt::{self, Display},
};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};
use machine_learning::MlErr;
use serde_json::json;

use crate::features::CoercionErr;

/// The result type of the API handlers.
pub type Result<T> = std::result::Result<T, ApiErr>;

/// A failed request, as reported back to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiErr {
    /// The request body lacks the expected structure.
    BadRequest(String),
    /// Anything else that went wrong while answering.
    Internal(String),
}

impl ApiErr {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErr::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiErr::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErr::BadRequest(msg) | ApiErr::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl Error for ApiErr {}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let status = self.status();
        let key = match &self {
            ApiErr::BadRequest(msg) => {
                warn!("rejected request: {msg}");
                "Error 400"
            }
            ApiErr::Internal(msg) => {
                error!("failed to answer request: {msg}");
                "Error 500"
            }
        };

        (status, Json(json!({ key: self.to_string() }))).into_response()
    }
}

impl From<MlErr> for ApiErr {
    fn from(value: MlErr) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<serde_json::Error> for ApiErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<CoercionErr> for ApiErr {
    fn from(value: CoercionErr) -> Self {
        Self::Internal(value.to_string())
    }
}
