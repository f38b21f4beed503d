//! Scheduler-mock reached over TLS.

use std::sync::Arc;

use reqwest::StatusCode;
use rustls::{ClientConfig, RootCertStore};

use backend_sim::scheduler::{JobRegisterResponse, SCHEDULER_SERVER_HEADER, TLS_CHECK_BODY};
use backend_sim::start;

use crate::common::fixtures::{https_client, loopback_config};

// The fixture certificate carries an IP SAN for 127.0.0.1, so the bound
// address is used directly as the host.

#[tokio::test(flavor = "multi_thread")]
async fn test_health_over_tls() {
    let servers = start(loopback_config()).await.unwrap();

    let url = format!("https://{}/v1/agent/health", servers.scheduler_addr());
    let response = https_client().get(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("server").unwrap(),
        SCHEDULER_SERVER_HEADER
    );

    servers.stop().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tls_check_endpoint() {
    let servers = start(loopback_config()).await.unwrap();

    let url = format!("https://{}/server", servers.scheduler_addr());
    let response = https_client().get(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), TLS_CHECK_BODY);

    servers.stop().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_register_over_tls() {
    let servers = start(loopback_config()).await.unwrap();

    let url = format!("https://{}/v1/jobs", servers.scheduler_addr());
    let response = https_client().post(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let registered: JobRegisterResponse = response.json().await.unwrap();
    assert_eq!(registered.job_modify_index, 33);

    servers.stop().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_untrusted_client_rejected() {
    let servers = start(loopback_config()).await.unwrap();

    // No trust anchors, so the self-signed fixture cannot verify
    let url = format!("https://{}/v1/agent/health", servers.scheduler_addr());
    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let tls = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_root_certificates(RootCertStore::empty())
        .with_no_client_auth();
    let client = reqwest::Client::builder()
        .use_preconfigured_tls(tls)
        .build()
        .unwrap();
    assert!(client.get(&url).send().await.is_err());

    servers.stop().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plaintext_rejected_on_tls_port() {
    let servers = start(loopback_config()).await.unwrap();

    let url = format!("http://{}/v1/agent/health", servers.scheduler_addr());
    let result = reqwest::get(&url).await;
    assert!(result.is_err() || !result.unwrap().status().is_success());

    servers.stop().await.unwrap();
}
