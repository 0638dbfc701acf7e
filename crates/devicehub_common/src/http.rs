// --- File: crates/devicehub_common/src/http.rs ---
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

use crate::error::{DevicehubError, HttpStatusCode};

pub mod client;
pub mod layers;

/// Extension trait for DevicehubError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for DevicehubError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        error_response(status_code, self.public_message())
    }
}

/// Implement IntoResponse for DevicehubError to make it easier to use in Axum handlers.
impl IntoResponse for DevicehubError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Builds the JSON error body shared by every devicehub endpoint.
pub fn error_response(status_code: StatusCode, message: &str) -> Response {
    let body = Json(json!({
        "error": {
            "message": message,
            "code": status_code.as_u16(),
        }
    }));

    (status_code, body).into_response()
}

/// Maps a rejected JSON body (bad syntax, wrong shape, missing content type) to a 422.
pub fn json_rejection(rejection: JsonRejection) -> DevicehubError {
    debug!("Rejected request body: {}", rejection.body_text());
    DevicehubError::UnprocessableEntity(rejection.body_text())
}
