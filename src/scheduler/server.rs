//! Scheduler-mock HTTPS server.
//!
//! Every job route answers any HTTP method and ignores the request body.
//! Responses are fixed shapes built fresh per call; the only variable part is
//! the job name echoed into the job-status response.

use std::net::TcpListener;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use tracing::info;

use super::types::{Deployment, Job, JobPlanResponse, JobRegisterResponse};
use crate::error::{Error, Result, ServerKind};
use crate::metrics::metrics_handler;
use crate::response::json_response;
use crate::state::SimState;

/// `Server` header value on scheduler-mock health responses
pub const SCHEDULER_SERVER_HEADER: &str = "Scheduler Simulation Server";

/// Body of the TLS check endpoint
pub const TLS_CHECK_BODY: &str = "i am protected";

/// Create the scheduler-mock router
pub fn create_router(state: Arc<SimState>) -> Router {
    Router::new()
        .route("/server", any(tls_check))
        .route("/v1/agent/health", any(agent_health))
        .route("/v1/jobs", any(register_job))
        .route("/v1/job/{job}", any(job_status))
        .route("/v1/job/{job}/plan", any(plan_job))
        .route("/v1/job/{job}/deployments", any(job_deployments))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn tls_check(State(state): State<Arc<SimState>>) -> &'static str {
    state.metrics.record_request(ServerKind::Scheduler, "server");
    TLS_CHECK_BODY
}

async fn agent_health(State(state): State<Arc<SimState>>) -> impl IntoResponse {
    info!("Scheduler mock: health");
    state.metrics.record_request(ServerKind::Scheduler, "health");
    (StatusCode::OK, [(header::SERVER, SCHEDULER_SERVER_HEADER)])
}

async fn plan_job(State(state): State<Arc<SimState>>, Path(job): Path<String>) -> Response {
    info!(job = %job, "Scheduler mock: plan");
    state.metrics.record_request(ServerKind::Scheduler, "plan");
    tokio::time::sleep(state.work_delay).await;
    json_response("plan", &JobPlanResponse::default())
}

async fn register_job(State(state): State<Arc<SimState>>) -> Response {
    info!("Scheduler mock: register");
    state.metrics.record_request(ServerKind::Scheduler, "register");
    tokio::time::sleep(state.work_delay).await;
    json_response("register", &JobRegisterResponse::accepted())
}

async fn job_status(State(state): State<Arc<SimState>>, Path(job): Path<String>) -> Response {
    info!(job = %job, "Scheduler mock: job status");
    state.metrics.record_request(ServerKind::Scheduler, "job_status");
    tokio::time::sleep(state.work_delay).await;
    json_response("job_status", &Job::service(&job))
}

async fn job_deployments(
    State(state): State<Arc<SimState>>,
    Path(job): Path<String>,
) -> Response {
    info!(job = %job, "Scheduler mock: deployment status");
    state.metrics.record_request(ServerKind::Scheduler, "deployments");
    tokio::time::sleep(state.work_delay).await;
    json_response("deployments", &[Deployment::successful()])
}

/// Load the scheduler TLS certificate and private key (PEM)
pub async fn load_tls_config(cert_path: &FsPath, key_path: &FsPath) -> Result<RustlsConfig> {
    RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(|source| Error::TlsConfig {
            cert: cert_path.to_path_buf(),
            key: key_path.to_path_buf(),
            source,
        })
}

/// Serve the scheduler-mock router over TLS until `handle` shuts it down
pub(crate) async fn serve(
    listener: TcpListener,
    tls: RustlsConfig,
    state: Arc<SimState>,
    handle: Handle,
) -> Result<()> {
    let app = create_router(state);
    info!(addr = ?listener.local_addr().ok(), "Starting scheduler simulation server with TLS");

    axum_server::from_tcp_rustls(listener, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|source| Error::Serve {
            server: ServerKind::Scheduler,
            source,
        })
}
