use crate::domain::error::StoreError;
use crate::transport::http::types::ErrorEnvelope;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Every failure a handler can answer with.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("the requested resource could not be found")]
    NotFound,

    #[error("the method is not supported for this resource")]
    MethodNotAllowed,

    #[error("failed validation")]
    FailedValidation(BTreeMap<String, String>),

    #[error("the server encountered a problem and could not process your request")]
    Internal(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::FailedValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            other => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Malformed or non-positive ids are indistinguishable from missing records.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::NotFound
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::FailedValidation(errors) => serde_json::json!(errors),
            ApiError::Internal(ref source) => {
                // The cause stays in the logs; clients only see the generic message.
                tracing::error!(error = %source, "request failed");
                serde_json::Value::String(self.to_string())
            }
            other => serde_json::Value::String(other.to_string()),
        };
        (status, Json(ErrorEnvelope { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn store_not_found_maps_to_404() {
        let e: ApiError = StoreError::NotFound.into();
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failures_hide_their_cause() {
        let e: ApiError = StoreError::Timeout(Duration::from_secs(3)).into();
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            e.to_string(),
            "the server encountered a problem and could not process your request"
        );
    }
}
