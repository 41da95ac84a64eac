//! HTTP error mapping
//!
//! Domain failures travel as structured JSON bodies with a matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::tools::lookup::{LookupError, LookupErrorResponse};
use crate::tools::recipe::AggregateError;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::Lookup(LookupError::MissingInput) => StatusCode::BAD_REQUEST,
            HttpError::Lookup(LookupError::NotFound { .. }) => StatusCode::NOT_FOUND,
            HttpError::Aggregate(_) | HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound => StatusCode::NOT_FOUND,
            HttpError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            HttpError::Lookup(err) => (status, Json(LookupErrorResponse::from(err))).into_response(),
            other => (status, Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}
