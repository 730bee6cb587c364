// routes.rs
use std::{any::Any, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

use crate::{
    config::Config,
    error::{ErrorMessage, HttpError},
    handler::{
        content::content_handler,
        eoi::{eoi_handler, preflight},
    },
    AppState,
};

// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

fn panic_detail(err: &(dyn Any + Send + 'static)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}

fn handle_eoi_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    error!("send-eoi handler panicked: {}", panic_detail(err.as_ref()));
    HttpError::server_error(ErrorMessage::SubmissionFailed.to_string()).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    error!("Handler panicked: {}", panic_detail(err.as_ref()));
    HttpError::server_error(ErrorMessage::ServerError.to_string()).into_response()
}

pub fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = cors_layer(&app_state.env);

    // Last layer is outermost: the OPTIONS rewrite sees the CORS preflight response.
    let eoi_routes = eoi_handler()
        .layer(CatchPanicLayer::custom(handle_eoi_panic))
        .layer(cors.clone())
        .layer(middleware::map_response(preflight));

    let api_route = Router::new()
        .merge(eoi_routes)
        .merge(content_handler().layer(cors))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state.clone()))
        .layer(DefaultBodyLimit::max(app_state.env.max_body_bytes));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .layer(CatchPanicLayer::custom(handle_panic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::mail::fake::FakeMailer;

    fn app() -> Router {
        let config = Config {
            cms_url: "http://127.0.0.1:1".to_string(),
            ..Config::default()
        };
        let app_state = AppState::new(config, Arc::new(FakeMailer::default())).unwrap();
        create_router(Arc::new(app_state))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "Server is running");
    }

    async fn panic_body(response: Response) -> serde_json::Value {
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_eoi_panic_becomes_json_500() {
        let json = panic_body(handle_eoi_panic(Box::new("template exploded"))).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Failed to submit EOI");
    }

    #[tokio::test]
    async fn test_other_panics_use_neutral_message() {
        let json = panic_body(handle_panic(Box::new(String::from("cms decode")))).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_catch_panic_layer_on_a_route() {
        async fn boom() -> &'static str {
            panic!("boom")
        }

        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));
        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = panic_body(response).await;
        assert_eq!(json["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_content_keeps_cors_preflight() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/content")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("allow").is_none());
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let config = Config {
            cms_url: "http://127.0.0.1:1".to_string(),
            max_body_bytes: 64,
            ..Config::default()
        };
        let mailer = Arc::new(FakeMailer::default());
        let app_state = AppState::new(config, mailer.clone()).unwrap();
        let app = create_router(Arc::new(app_state));

        let payload = format!("{{\"name1\": \"{}\"}}", "x".repeat(256));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/send-eoi")
                    .header("content-type", "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
