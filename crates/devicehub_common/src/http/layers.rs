// --- File: crates/devicehub_common/src/http/layers.rs ---
//! Middleware shared by both devicehub services.

use axum::{extract::Request, http::StatusCode, response::Response, Router};
use devicehub_config::CorsConfig;
use http::HeaderValue;
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info_span, warn};

use crate::http::error_response;

/// Handler signature used by [`catch_panic_layer`].
pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Builds the CORS layer from the configured origin allow-list.
///
/// Origins that are not valid header values are skipped with a warning. A `*` entry
/// anywhere in the list allows any origin, in which case credentials are not advertised.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.iter().any(|origin| origin.trim() == "*") {
        if config.allowed_origins.len() > 1 {
            warn!("CORS origin list contains \"*\"; allowing any origin");
        }
        return CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods(AllowMethods::any())
            .allow_headers(AllowHeaders::any());
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Turns a panic inside a handler into the standard 500 error body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!("Request handler panicked: {}", detail);

    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// Catch-panic layer that answers with [`panic_response`].
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

/// Wraps a service router with request ids, request tracing and CORS.
///
/// `x-request-id` is generated when the caller did not send one and is echoed on the
/// response. The tracing span of every request carries it.
pub fn with_http_layers(router: Router, cors: &CorsConfig) -> Router {
    router
        .layer(cors_layer(cors))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");
                info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get};
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_server_error() {
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(catch_panic_layer());

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_wildcard_among_origins_allows_any_origin() {
        let cors = CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string(), "*".to_string()],
        };
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(cors_layer(&cors));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header("origin", "https://elsewhere.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert!(!response
            .headers()
            .contains_key("access-control-allow-credentials"));
    }

    #[tokio::test]
    async fn test_request_id_is_generated_and_cors_applied() {
        let app = with_http_layers(
            Router::new().route("/ping", get(|| async { "pong" })),
            &CorsConfig::default(),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-credentials")
                .unwrap(),
            "true"
        );
    }
}
