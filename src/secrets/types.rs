//! Response and request types for the secrets-mock.

use serde::{Deserialize, Serialize};

/// A secret write payload: secret key name to arbitrary JSON value.
///
/// Decodes into a sorted map, so iteration is in key order.
pub type SecretBundle = serde_json::Map<String, serde_json::Value>;

/// Health response in the secrets store's schema
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretsHealth {
    pub initialized: bool,
    pub sealed: bool,
    pub standby: bool,
    pub performance_standby: bool,
    pub replication_performance_mode: String,
    pub replication_dr_mode: String,
    pub server_time_utc: i64,
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_id: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_wal: u64,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl SecretsHealth {
    /// An initialized, unsealed, active node. Every field is a constant.
    pub fn unsealed() -> Self {
        Self {
            initialized: true,
            sealed: false,
            standby: false,
            performance_standby: false,
            replication_performance_mode: "disabled".to_string(),
            replication_dr_mode: "disabled".to_string(),
            server_time_utc: 1_516_639_589,
            version: "0.9.2".to_string(),
            cluster_name: "vault-cluster-3bd69ca2".to_string(),
            cluster_id: "00af5aa8-c87d-b5fc-e82e-97cd8dfaf731".to_string(),
            last_wal: 0,
        }
    }
}
