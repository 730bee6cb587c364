// src/handler/eoi.rs
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use tracing::{info, warn};

use crate::{
    dtos::ApiResponse,
    error::HttpError,
    service::{eoi_intake::parse_submission, error::EoiError},
    AppState,
};

pub fn eoi_handler() -> Router {
    Router::new().route(
        "/send-eoi",
        post(send_eoi).fallback(method_not_allowed),
    )
}

pub async fn send_eoi(
    Extension(app_state): Extension<Arc<AppState>>,
    request: Request,
) -> Result<impl IntoResponse, HttpError> {
    info!("send-eoi: incoming {} {}", request.method(), request.uri());

    let submission = parse_submission(request).await.map_err(|e| {
        let error = EoiError::from(e);
        warn!(status = %error.status_code(), "send-eoi: {}", error);
        HttpError::from(error)
    })?;

    app_state
        .eoi_service
        .submit(&submission)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::submitted()))
}

// Callers always get JSON back, whatever method they used.
pub async fn method_not_allowed(method: Method) -> HttpError {
    info!("send-eoi: {} rejected", method);
    HttpError::method_not_allowed(method.as_str())
}

/// Runs outside the CORS layer, which answers every OPTIONS request itself.
pub async fn preflight(method: Method, mut response: Response) -> Response {
    if method == Method::OPTIONS {
        *response.status_mut() = StatusCode::NO_CONTENT;
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("POST, OPTIONS"));
    }
    response
}
