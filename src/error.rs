//! Error types for the simulation servers.
//!
//! Only startup and listener failures surface here. Request-level failures
//! (unreadable bodies, encoding errors) are answered with an HTTP status and
//! never reach the supervisor.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two simulated backends a listener belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServerKind {
    /// TLS scheduler-mock listener
    Scheduler,
    /// Plaintext secrets-mock listener
    Secrets,
}

impl ServerKind {
    /// Short lowercase name, used in logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerKind::Scheduler => "scheduler",
            ServerKind::Secrets => "secrets",
        }
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for server startup and supervision
#[derive(Error, Debug)]
pub enum Error {
    /// TLS certificate or key could not be loaded
    #[error("TLS configuration error (cert {cert:?}, key {key:?}): {source}")]
    TlsConfig {
        cert: PathBuf,
        key: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A listener failed to bind or stopped with an I/O error
    #[error("{server} server error: {source}")]
    Serve {
        server: ServerKind,
        #[source]
        source: std::io::Error,
    },

    /// The supervising task panicked or was cancelled
    #[error("Supervisor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// The listener this error originated from, if any
    pub fn server(&self) -> Option<ServerKind> {
        match self {
            Error::TlsConfig { .. } => Some(ServerKind::Scheduler),
            Error::Serve { server, .. } => Some(*server),
            Error::Join(_) => None,
        }
    }
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, Error>;
