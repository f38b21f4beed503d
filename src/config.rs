//! Listener configuration.
//!
//! Everything the servers need is carried in [`SimConfig`] and passed to
//! [`crate::start`], so several instances can run side by side (tests bind
//! ephemeral ports on 127.0.0.1).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default scheduler-mock (TLS) port
pub const DEFAULT_SCHEDULER_PORT: u16 = 8080;
/// Default secrets-mock (plaintext) port
pub const DEFAULT_SECRETS_PORT: u16 = 8200;
/// Default path to the scheduler TLS certificate (PEM)
pub const DEFAULT_TLS_CERT_PATH: &str = "../tls-certificates/00-certificates/server/cert.pem";
/// Default path to the scheduler TLS private key (PEM)
pub const DEFAULT_TLS_KEY_PATH: &str = "../tls-certificates/00-certificates/server/key.pem";
/// Default artificial latency for scheduler job endpoints
pub const DEFAULT_WORK_DELAY: Duration = Duration::from_millis(100);
/// Default artificial latency for secret writes
pub const DEFAULT_SECRET_WRITE_DELAY: Duration = Duration::from_millis(5);
/// Grace period for in-flight requests when the servers stop
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Configuration for both simulated backends
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Bind address of the TLS scheduler-mock listener
    pub scheduler_addr: SocketAddr,
    /// Bind address of the plaintext secrets-mock listener
    pub secrets_addr: SocketAddr,
    /// Scheduler TLS certificate (PEM)
    pub tls_cert_path: PathBuf,
    /// Scheduler TLS private key (PEM)
    pub tls_key_path: PathBuf,
    /// Latency added to plan/register/status/deployment responses
    pub work_delay: Duration,
    /// Latency added to secret writes
    pub secret_write_delay: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scheduler_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_SCHEDULER_PORT)),
            secrets_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_SECRETS_PORT)),
            tls_cert_path: PathBuf::from(DEFAULT_TLS_CERT_PATH),
            tls_key_path: PathBuf::from(DEFAULT_TLS_KEY_PATH),
            work_delay: DEFAULT_WORK_DELAY,
            secret_write_delay: DEFAULT_SECRET_WRITE_DELAY,
        }
    }
}

impl SimConfig {
    /// Configuration binding both listeners to ephemeral ports on loopback
    pub fn loopback() -> Self {
        Self {
            scheduler_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            secrets_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            ..Self::default()
        }
    }

    /// Override the TLS certificate and key paths
    pub fn with_tls(mut self, cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        self.tls_cert_path = cert.into();
        self.tls_key_path = key.into();
        self
    }

    /// Override both artificial delays
    pub fn with_delays(mut self, work_delay: Duration, secret_write_delay: Duration) -> Self {
        self.work_delay = work_delay;
        self.secret_write_delay = secret_write_delay;
        self
    }
}
