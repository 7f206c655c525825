//! Request-level errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use carstore_core::StoreError;
use thiserror::Error;

/// Everything a handler can fail with. Each variant is a terminated
/// response with a status and a short plain-text message.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The `{id}` path segment is not a base-10 integer.
    #[error("Invalid ID")]
    InvalidId,

    /// The request body did not decode. Carries the client-facing message.
    #[error("{0}")]
    InvalidBody(String),

    /// No car has the requested id.
    #[error("Car not found")]
    NotFound,

    /// The mutation could not be written to the data file.
    #[error("Failed to save data: {0}")]
    Persist(StoreError),

    /// The store task did not complete.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Persist(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Persist(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status, self);
        }
        (status, self.to_string()).into_response()
    }
}
