//! Response types for the scheduler-mock.
//!
//! Field names follow the real scheduler API (PascalCase). Unset optional
//! fields serialize as `null`, as the real API does for nil pointers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Modify index reported for every registered job and deployment
pub const JOB_MODIFY_INDEX: u64 = 33;

/// Job type reported by the job-status endpoint
pub const JOB_TYPE_SERVICE: &str = "service";

/// Zero value of a timestamp in the real API's encoding
pub const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

/// Dry-run planning outcome. The mock always returns the zero value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobPlanResponse {
    #[serde(rename = "JobModifyIndex")]
    pub job_modify_index: u64,
    #[serde(rename = "CreatedEvals")]
    pub created_evals: Option<Vec<serde_json::Value>>,
    #[serde(rename = "Diff")]
    pub diff: Option<serde_json::Value>,
    #[serde(rename = "Annotations")]
    pub annotations: Option<serde_json::Value>,
    #[serde(rename = "FailedTGAllocs")]
    pub failed_tg_allocs: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(rename = "NextPeriodicLaunch")]
    pub next_periodic_launch: String,
    #[serde(rename = "Warnings")]
    pub warnings: String,
}

impl Default for JobPlanResponse {
    fn default() -> Self {
        Self {
            job_modify_index: 0,
            created_evals: None,
            diff: None,
            annotations: None,
            failed_tg_allocs: None,
            next_periodic_launch: ZERO_TIME.to_string(),
            warnings: String::new(),
        }
    }
}

/// Job submission acknowledgment
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRegisterResponse {
    #[serde(rename = "EvalID")]
    pub eval_id: String,
    #[serde(rename = "EvalCreateIndex")]
    pub eval_create_index: u64,
    #[serde(rename = "JobModifyIndex")]
    pub job_modify_index: u64,
    #[serde(rename = "Warnings")]
    pub warnings: String,
    #[serde(rename = "LastIndex")]
    pub last_index: u64,
    #[serde(rename = "RequestTime")]
    pub request_time: i64,
}

impl JobRegisterResponse {
    /// Acknowledgment carrying the fixed modify index
    pub fn accepted() -> Self {
        Self {
            job_modify_index: JOB_MODIFY_INDEX,
            ..Self::default()
        }
    }
}

/// Job metadata returned by the job-status endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Namespace")]
    pub namespace: Option<String>,
    #[serde(rename = "Type")]
    pub job_type: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Stop")]
    pub stop: Option<bool>,
    #[serde(rename = "Version")]
    pub version: Option<u64>,
    #[serde(rename = "ModifyIndex")]
    pub modify_index: Option<u64>,
    #[serde(rename = "JobModifyIndex")]
    pub job_modify_index: Option<u64>,
}

impl Job {
    /// A service job with the given name
    pub fn service(name: &str) -> Self {
        Self {
            id: Some(name.to_string()),
            name: Some(name.to_string()),
            job_type: Some(JOB_TYPE_SERVICE.to_string()),
            ..Self::default()
        }
    }
}

/// Deployment progress states used by the real API
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    #[default]
    Pending,
    Running,
    Paused,
    Failed,
    Successful,
    Cancelled,
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentStatus::Pending => write!(f, "pending"),
            DeploymentStatus::Running => write!(f, "running"),
            DeploymentStatus::Paused => write!(f, "paused"),
            DeploymentStatus::Failed => write!(f, "failed"),
            DeploymentStatus::Successful => write!(f, "successful"),
            DeploymentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A deployment record
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Namespace")]
    pub namespace: String,
    #[serde(rename = "JobID")]
    pub job_id: String,
    #[serde(rename = "JobVersion")]
    pub job_version: u64,
    #[serde(rename = "JobModifyIndex")]
    pub job_modify_index: u64,
    #[serde(rename = "JobSpecModifyIndex")]
    pub job_spec_modify_index: u64,
    #[serde(rename = "JobCreateIndex")]
    pub job_create_index: u64,
    #[serde(rename = "Status")]
    pub status: DeploymentStatus,
    #[serde(rename = "StatusDescription")]
    pub status_description: String,
    #[serde(rename = "CreateIndex")]
    pub create_index: u64,
    #[serde(rename = "ModifyIndex")]
    pub modify_index: u64,
}

impl Deployment {
    /// The only deployment the mock ever reports: finished successfully.
    ///
    /// Every call returns this, regardless of job or call count; there is no
    /// per-job progression through pending or failed.
    pub fn successful() -> Self {
        Self {
            job_spec_modify_index: JOB_MODIFY_INDEX,
            status: DeploymentStatus::Successful,
            ..Self::default()
        }
    }
}
