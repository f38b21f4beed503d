// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::string_slice
)]

//! Property-based tests for backend-sim.
//!
//! Uses proptest to generate random inputs and verify invariants.

#[path = "../common/mod.rs"]
mod common;

use axum::body::Body;
use axum::http::StatusCode;
use proptest::prelude::*;
use serde_json::{Map, Value};

use backend_sim::scheduler::{self, Deployment, DeploymentStatus, JobRegisterResponse};
use backend_sim::secrets::{
    self, SENSITIVE_MARKERS, SecretBundle, is_sensitive, representative_entry,
};

use common::fixtures::{instant_state, send};

/// Strategy for job names that are valid single path segments.
fn job_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,30}"
}

/// Strategy for string values that carry one of the sensitive markers.
fn sensitive_string() -> impl Strategy<Value = String> {
    (
        prop::sample::select(SENSITIVE_MARKERS.to_vec()),
        "[A-Za-z0-9+/=\n]{0,40}",
    )
        .prop_map(|(marker, material)| format!("-----{}-----\n{}", marker, material))
}

/// Strategy for JSON values without any sensitive marker.
fn plain_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9 _-]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

/// Strategy for bundles mixing sensitive and plain entries.
fn mixed_bundle() -> impl Strategy<Value = SecretBundle> {
    prop::collection::btree_map(
        "[A-Z_]{1,12}",
        prop_oneof![
            sensitive_string().prop_map(Value::String),
            plain_value(),
        ],
        0..8,
    )
    .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The preview is never a sensitive value.
    #[test]
    fn prop_preview_never_sensitive(bundle in mixed_bundle()) {
        if let Some(preview) = representative_entry(&bundle) {
            prop_assert!(!is_sensitive(preview.value));
            for marker in SENSITIVE_MARKERS {
                prop_assert!(!preview.value_text().contains(marker));
            }
        }
    }

    /// The preview is the first plain entry in key order.
    #[test]
    fn prop_preview_is_first_plain_entry(bundle in mixed_bundle()) {
        let expected = bundle
            .iter()
            .filter(|(_, value)| !is_sensitive(value))
            .map(|(key, _)| key.as_str())
            .min();
        prop_assert_eq!(representative_entry(&bundle).map(|p| p.key), expected);
    }

    /// Any string containing a marker is sensitive, wherever it is nested.
    #[test]
    fn prop_marker_anywhere_is_sensitive(
        material in sensitive_string(),
        prefix in "[a-z ]{0,10}",
        depth in 0usize..4,
    ) {
        let mut value = Value::String(format!("{}{}", prefix, material));
        for level in 0..depth {
            value = if level % 2 == 0 {
                Value::Array(vec![Value::from(1), value])
            } else {
                let mut map = Map::new();
                map.insert("inner".to_string(), value);
                Value::Object(map)
            };
        }
        prop_assert!(is_sensitive(&value));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Registering any job reports the fixed modify index.
    #[test]
    fn prop_register_index_fixed(body in "[ -~]{0,64}") {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let reply = rt.block_on(send(
            scheduler::create_router(instant_state()),
            "POST",
            "/v1/jobs",
            body,
        ));
        prop_assert_eq!(reply.status, StatusCode::OK);
        let registered: JobRegisterResponse = serde_json::from_slice(&reply.body).unwrap();
        prop_assert_eq!(registered.job_modify_index, 33);
    }

    /// Every job's deployment list is one successful deployment.
    #[test]
    fn prop_deployments_successful_for_any_job(job in job_name()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let reply = rt.block_on(send(
            scheduler::create_router(instant_state()),
            "GET",
            &format!("/v1/job/{}/deployments", job),
            Body::empty(),
        ));
        prop_assert_eq!(reply.status, StatusCode::OK);
        let deployments: Vec<Deployment> = serde_json::from_slice(&reply.body).unwrap();
        prop_assert_eq!(deployments.len(), 1);
        prop_assert_eq!(deployments[0].status, DeploymentStatus::Successful);
    }

    /// Any JSON object body is accepted with an empty 200.
    #[test]
    fn prop_object_body_accepted(bundle in mixed_bundle(), name in job_name()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let body = serde_json::to_string(&bundle).unwrap();
        let reply = rt.block_on(send(
            secrets::create_router(instant_state()),
            "PUT",
            &format!("/v1/secret/{}", name),
            body,
        ));
        prop_assert_eq!(reply.status, StatusCode::OK);
        prop_assert!(reply.body.is_empty());
    }

    /// Text that is not JSON is rejected with 422.
    #[test]
    fn prop_non_json_rejected(body in "[A-Z=&]{1,40}") {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let reply = rt.block_on(send(
            secrets::create_router(instant_state()),
            "PUT",
            "/v1/secret/demo",
            body,
        ));
        prop_assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
