use actix_web::{HttpResponse, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Caller-recoverable failures raised by the attendance engine.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum EngineError {
    /// Malformed or missing input, e.g. absent coordinates.
    #[display(fmt = "{}", _0)]
    Validation(String),
    /// Operation violates the one-open-session invariant.
    #[display(fmt = "{}", _0)]
    Conflict(String),
    /// Referenced session or record does not exist.
    #[display(fmt = "{}", _0)]
    NotFound(String),
    /// Operation attempted on a non-persisted synthetic row.
    #[display(fmt = "{}", _0)]
    InvalidOperation(String),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        EngineError::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        EngineError::NotFound(message.into())
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        EngineError::InvalidOperation(message.into())
    }
}

impl actix_web::ResponseError for EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::Validation(_) => StatusCode::BAD_REQUEST,
            EngineError::Conflict(_) => StatusCode::CONFLICT,
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::InvalidOperation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
