//! JSON response helpers shared by both routers.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Serialize `value` as a 200 JSON response.
///
/// An encoding failure is answered with 500 and logged; the server keeps
/// serving other requests.
pub fn json_response<T: Serialize>(endpoint: &str, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(endpoint = %endpoint, error = %e, "Failed to encode JSON response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to encode {} response", endpoint),
            )
                .into_response()
        }
    }
}
