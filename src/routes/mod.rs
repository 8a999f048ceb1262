use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod prices;

/// Error body returned by every non-2xx response:
/// a machine-readable code, a human-readable message and a UTC timestamp.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Turn an actix query-string rejection (missing parameter, unparseable number
/// or datetime) into a 400 with the standard error body.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new("INVALID_FORMAT", format!("Invalid format: {err}")));
    InternalError::from_response(err, response).into()
}
