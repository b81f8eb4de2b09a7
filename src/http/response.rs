//! Response types and error mapping.
//!
//! # Responsibilities
//! - Define JSON response bodies
//! - Map handler failures to HTTP status codes
//!
//! # Design Decisions
//! - Client errors carry a short plain-text reason
//! - "No match" is a bare 404 with an empty body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frequency::InvalidWordError;

/// Body of a successful prefix query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordResponse {
    pub word: String,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub distinct_words: usize,
}

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body was not a JSON object of the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The word failed validation.
    #[error("invalid word: {0}")]
    InvalidWord(#[from] InvalidWordError),

    /// No stored word matches the prefix.
    #[error("no word matches prefix")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::InvalidWord(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::InvalidBody(_) => (status, "Invalid request body.").into_response(),
            ApiError::InvalidWord(_) => (status, "Invalid word format.").into_response(),
            ApiError::NotFound => status.into_response(),
        }
    }
}
