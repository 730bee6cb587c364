// src/service/eoi_intake.rs
use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use tracing::debug;

use crate::{
    dtos::{EoiFormDto, ParseError, PASSPORT1_FIELD, PASSPORT2_FIELD},
    models::eoimodel::{PassportUpload, SubmissionRequest, DEFAULT_PASSPORT1_NAME, DEFAULT_PASSPORT2_NAME},
};

/// Reads one EOI submission from the request: multipart when the client says so,
/// JSON otherwise. Either the whole body parses or nothing does.
pub async fn parse_submission(request: Request) -> Result<SubmissionRequest, ParseError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.contains("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ParseError::Multipart(e.body_text()))?;
        read_multipart(multipart).await
    } else {
        let body = Bytes::from_request(request, &())
            .await
            .map_err(|e| ParseError::Json(e.body_text()))?;
        let dto: EoiFormDto =
            serde_json::from_slice(&body).map_err(|e| ParseError::Json(e.to_string()))?;
        dto.into_submission(None, None)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<SubmissionRequest, ParseError> {
    let mut dto = EoiFormDto::default();
    let mut passport1 = None;
    let mut passport2 = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ParseError::Multipart(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        let (slot, default_name) = match name.as_str() {
            PASSPORT1_FIELD => (&mut passport1, DEFAULT_PASSPORT1_NAME),
            PASSPORT2_FIELD => (&mut passport2, DEFAULT_PASSPORT2_NAME),
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ParseError::Multipart(e.body_text()))?;
                dto.set_field(&name, value);
                continue;
            }
        };

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let content = field
            .bytes()
            .await
            .map_err(|e| ParseError::Multipart(e.body_text()))?;

        debug!("Received {} upload ({} bytes)", name, content.len());

        if slot.is_none() {
            *slot = PassportUpload::from_part(file_name, content_type, content, default_name);
        }
    }

    dto.into_submission(passport1, passport2)
}
