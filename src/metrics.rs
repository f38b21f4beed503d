//! Prometheus request counters for the simulated backends.
//!
//! Both routers serve the same registry at `/metrics`, so a test can check
//! which endpoints a client actually called. Counters never influence a
//! response body.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::{EncodeLabel, EncodeLabelSet, LabelSetEncoder};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

use crate::error::ServerKind;
use crate::state::SimState;

/// Labels for per-endpoint request counters (server + endpoint)
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct EndpointLabels {
    pub server: &'static str,
    pub endpoint: &'static str,
}

impl EncodeLabelSet for EndpointLabels {
    fn encode(&self, encoder: &mut LabelSetEncoder<'_>) -> Result<(), std::fmt::Error> {
        ("server", self.server).encode(encoder.encode_label())?;
        ("endpoint", self.endpoint).encode(encoder.encode_label())?;
        Ok(())
    }
}

/// Labels for rejected secret writes
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RejectLabels {
    pub reason: &'static str,
}

impl EncodeLabelSet for RejectLabels {
    fn encode(&self, encoder: &mut LabelSetEncoder<'_>) -> Result<(), std::fmt::Error> {
        ("reason", self.reason).encode(encoder.encode_label())?;
        Ok(())
    }
}

/// Why a secret write was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Request body could not be read (400)
    Unreadable,
    /// Request body was not a JSON object (422)
    InvalidJson,
}

impl RejectReason {
    fn as_label(self) -> &'static str {
        match self {
            RejectReason::Unreadable => "unreadable",
            RejectReason::InvalidJson => "invalid_json",
        }
    }
}

/// Shared metrics for both simulated backends
pub struct Metrics {
    /// Requests served, by server and endpoint
    pub requests_total: Family<EndpointLabels, Counter>,
    /// Secret writes answered with 400 or 422
    pub secret_writes_rejected_total: Family<RejectLabels, Counter>,
    registry: Registry,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance with registered metrics
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let requests_total = Family::<EndpointLabels, Counter>::default();
        registry.register(
            "sim_requests",
            "Total number of requests served by a simulated endpoint",
            requests_total.clone(),
        );

        let secret_writes_rejected_total = Family::<RejectLabels, Counter>::default();
        registry.register(
            "sim_secret_writes_rejected",
            "Total number of secret writes rejected for an unreadable or invalid body",
            secret_writes_rejected_total.clone(),
        );

        Self {
            requests_total,
            secret_writes_rejected_total,
            registry,
        }
    }

    /// Record a request to an endpoint
    pub fn record_request(&self, server: ServerKind, endpoint: &'static str) {
        let labels = EndpointLabels {
            server: server.as_str(),
            endpoint,
        };
        self.requests_total.get_or_create(&labels).inc();
    }

    /// Record a rejected secret write
    pub fn record_rejected_write(&self, reason: RejectReason) {
        let labels = RejectLabels {
            reason: reason.as_label(),
        };
        self.secret_writes_rejected_total
            .get_or_create(&labels)
            .inc();
    }

    /// Number of requests recorded for an endpoint
    pub fn request_count(&self, server: ServerKind, endpoint: &'static str) -> u64 {
        let labels = EndpointLabels {
            server: server.as_str(),
            endpoint,
        };
        self.requests_total.get_or_create(&labels).get()
    }

    /// Encode metrics to Prometheus text format
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        if encode(&mut buffer, &self.registry).is_err() {
            tracing::error!("Failed to encode metrics");
            return "# Error encoding metrics".to_string();
        }
        buffer
    }
}

/// Metrics handler, mounted on both routers
pub async fn metrics_handler(State(state): State<Arc<SimState>>) -> impl IntoResponse {
    let body = state.metrics.encode();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
