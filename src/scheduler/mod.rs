//! Scheduler-mock: a TLS server answering the health, plan, register,
//! job-status and deployment-status endpoints of a workload scheduler API.

mod server;
pub mod types;

pub(crate) use server::serve;
pub use server::{SCHEDULER_SERVER_HEADER, TLS_CHECK_BODY, create_router, load_tls_config};
pub use types::{
    Deployment, DeploymentStatus, JOB_MODIFY_INDEX, JOB_TYPE_SERVICE, Job, JobPlanResponse,
    JobRegisterResponse,
};
