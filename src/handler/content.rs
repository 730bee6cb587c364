// src/handler/content.rs
use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::AppState;

pub fn content_handler() -> Router {
    Router::new().route("/content", get(get_page_content))
}

/// Landing page copy. Always 200: missing CMS documents come back as defaults.
pub async fn get_page_content(
    Extension(app_state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    Json(app_state.content_service.page_content().await)
}
