use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use pitchmatch_common::PitchMatchError;
use serde_json::json;
use std::fmt;
use tracing::error;

/// Message sent for any server-side failure
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error.";

/// HTTP-facing error with a `{"detail": ...}` body
#[derive(Debug)]
pub enum ApiError {
    /// Request rejected with 400 and the given detail
    BadRequest(String),

    /// Failure inside the service
    Service(PitchMatchError),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest(detail.into())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(detail) => write!(f, "{}", detail),
            Self::Service(e) => write!(f, "{}", e),
        }
    }
}

impl From<PitchMatchError> for ApiError {
    fn from(e: PitchMatchError) -> Self {
        Self::Service(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Service(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            Self::BadRequest(detail) => detail.clone(),
            Self::Service(e) if e.is_client_error() => e.to_string(),
            Self::Service(e) => {
                error!("Request failed: {}", e);
                INTERNAL_ERROR_DETAIL.to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(json!({ "detail": detail }))
    }
}
