//! backend-sim library crate
//!
//! Simulates two HTTP backends so client applications can be exercised
//! end-to-end without real deployments:
//!
//! - a workload scheduler, served over TLS ([`scheduler`])
//! - a secrets store, served over plaintext ([`secrets`])
//!
//! Responses are fixed shapes with no state carried between requests. Both
//! listeners are owned by one supervisor ([`start`], [`run`]) that stops them
//! together.

pub mod config;
pub mod error;
pub mod metrics;
pub mod response;
pub mod scheduler;
pub mod secrets;
pub mod state;
mod supervisor;

pub use config::SimConfig;
pub use error::{Error, Result, ServerKind};
pub use state::SimState;
pub use supervisor::{RunningServers, run, shutdown_signal, start};
