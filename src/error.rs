use actix_web::{body::BoxBody, http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DtoError {
    #[error("message {0} is not allowed")]
    MessageNotAllowed(String),
    #[error("the number of message fields {0} must be greater than 0")]
    NumberOfFields(String),
    #[error("dependency {dependency} not found for message {message}")]
    NoDependency { dependency: String, message: String },
    #[error("{0} message not implemented")]
    MessageNotImplemented(String),
    #[error("generate can only be called once")]
    MultipleGenerateCall,
    #[error("{0} message is unsafe")]
    UnsafeMessage(String),
    #[error("message {message} has type id {found}, expected {expected}")]
    InvalidTypeId {
        message: String,
        found: String,
        expected: String,
    },
    #[error("Invalid allowed message: {0}")]
    InvalidAllowMessage(String),
    #[error("expected an object for {message}, found {found}")]
    NotAnObject { message: String, found: &'static str },
    #[error("{message} is missing marker key {marker}")]
    MissingMarker { message: String, marker: String },
    #[error("value carries markers of several messages: {}", .0.join(", "))]
    AmbiguousMarkers(Vec<String>),
    #[error("value does not carry a known message marker")]
    UnknownMessage,
    #[error("invalid {message} payload: {source}")]
    InvalidPayload {
        message: String,
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<validator::ValidationErrors> for DtoError {
    fn from(err: validator::ValidationErrors) -> Self {
        DtoError::InvalidAllowMessage(err.to_string())
    }
}

impl ResponseError for DtoError {
    fn status_code(&self) -> StatusCode {
        match self {
            DtoError::NotAnObject { .. } |
            DtoError::MissingMarker { .. } |
            DtoError::AmbiguousMarkers(_) |
            DtoError::UnknownMessage |
            DtoError::InvalidPayload { .. } |
            DtoError::Json(_) |
            DtoError::InvalidAllowMessage(_) => StatusCode::BAD_REQUEST,
            DtoError::MessageNotAllowed(_) |
            DtoError::NumberOfFields(_) |
            DtoError::NoDependency { .. } |
            DtoError::MessageNotImplemented(_) |
            DtoError::MultipleGenerateCall |
            DtoError::UnsafeMessage(_) |
            DtoError::InvalidTypeId { .. } |
            DtoError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if self.status_code().is_server_error() {
            error!("DTO error: {}", self);
        }
        HttpResponse::build(self.status_code()).json(ApiErrorResponse {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
