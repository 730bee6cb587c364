use axum::http::StatusCode;
use thiserror::Error;

use crate::{
    dtos::ParseError,
    error::{ErrorMessage, HttpError},
};

#[derive(Error, Debug)]
pub enum EoiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] ParseError),

    #[error("SMTP verification failed: {0}")]
    SmtpVerification(String),

    #[error("Email delivery failed: {0}")]
    Delivery(String),
}

impl From<EoiError> for HttpError {
    fn from(error: EoiError) -> Self {
        match error {
            EoiError::InvalidBody(_) => {
                HttpError::bad_request(ErrorMessage::InvalidRequestBody.to_string())
            }

            // Relay detail goes back to the form.
            EoiError::SmtpVerification(_) => HttpError::server_error(error.to_string()),

            EoiError::Delivery(_) => {
                HttpError::server_error(ErrorMessage::SubmissionFailed.to_string())
            }
        }
    }
}

impl EoiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EoiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            EoiError::SmtpVerification(_) | EoiError::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
