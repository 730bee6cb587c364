use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::dtos::ApiResponse;

#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    InvalidRequestBody,
    SubmissionFailed,
    ServerError,
    MethodNotAllowed(String),
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::InvalidRequestBody => write!(f, "Invalid request body"),
            ErrorMessage::SubmissionFailed => write!(f, "Failed to submit EOI"),
            ErrorMessage::ServerError => write!(f, "Internal server error"),
            ErrorMessage::MethodNotAllowed(method) => {
                write!(f, "Method {} not allowed. Use POST.", method)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        HttpError {
            message: ErrorMessage::MethodNotAllowed(method.into()).to_string(),
            status: StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn into_http_response(self) -> Response {
        (self.status, Json(ApiResponse::failure(self.message))).into_response()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
