//! Secrets-mock HTTP server (plaintext).

use std::net::TcpListener;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use axum_server::Handle;
use tracing::{debug, info, warn};

use super::redact::representative_entry;
use super::types::{SecretBundle, SecretsHealth};
use crate::error::{Error, Result, ServerKind};
use crate::metrics::{RejectReason, metrics_handler};
use crate::response::json_response;
use crate::state::SimState;

/// `Server` header value on secret-write responses
pub const SECRETS_SERVER_HEADER: &str = "Secrets Simulation Server";

/// Largest secret-write body read; anything bigger counts as unreadable
pub const MAX_SECRET_BODY_BYTES: usize = 16 * 1024 * 1024;

const UNREADABLE_BODY: &str = "can't read body";

/// Create the secrets-mock router
pub fn create_router(state: Arc<SimState>) -> Router {
    Router::new()
        .route("/v1/sys/health", get(sys_health))
        .route("/v1/secret/{name}", put(write_secret))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn sys_health(State(state): State<Arc<SimState>>) -> Response {
    info!("Secrets mock: health");
    state.metrics.record_request(ServerKind::Secrets, "health");
    json_response("sys_health", &SecretsHealth::unsealed())
}

/// Decode a secret-write body.
///
/// A literal `null` is accepted as an empty bundle; any other non-object
/// JSON is an error.
pub fn decode_bundle(body: &[u8]) -> serde_json::Result<SecretBundle> {
    serde_json::from_slice::<Option<SecretBundle>>(body).map(Option::unwrap_or_default)
}

async fn write_secret(
    State(state): State<Arc<SimState>>,
    Path(name): Path<String>,
    body: Body,
) -> Response {
    info!(secret = %name, "Secrets mock: secret write");
    state.metrics.record_request(ServerKind::Secrets, "secret_write");
    tokio::time::sleep(state.secret_write_delay).await;

    let bytes: Bytes = match to_bytes(body, MAX_SECRET_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(secret = %name, error = %e, "Failed to read secret body");
            state
                .metrics
                .record_rejected_write(RejectReason::Unreadable);
            return (StatusCode::BAD_REQUEST, UNREADABLE_BODY).into_response();
        }
    };

    let bundle = match decode_bundle(&bytes) {
        Ok(bundle) => bundle,
        Err(e) => {
            warn!(secret = %name, error = %e, "Failed to decode secret body");
            state
                .metrics
                .record_rejected_write(RejectReason::InvalidJson);
            return (StatusCode::UNPROCESSABLE_ENTITY, UNREADABLE_BODY).into_response();
        }
    };

    match representative_entry(&bundle) {
        Some(preview) => info!(
            secret = %name,
            entries = bundle.len(),
            key = %preview.key,
            value = %preview.value_text(),
            "Received secret bundle"
        ),
        None => debug!(
            secret = %name,
            entries = bundle.len(),
            "Received secret bundle with no printable entry"
        ),
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::SERVER, SECRETS_SERVER_HEADER),
        ],
    )
        .into_response()
}

/// Serve the secrets-mock router over plaintext until `handle` shuts it down
pub(crate) async fn serve(listener: TcpListener, state: Arc<SimState>, handle: Handle) -> Result<()> {
    let app = create_router(state);
    info!(addr = ?listener.local_addr().ok(), "Starting secrets simulation server");

    axum_server::from_tcp(listener)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|source| Error::Serve {
            server: ServerKind::Secrets,
            source,
        })
}
