//! Runs both simulated backends under one owner.
//!
//! The scheduler-mock (TLS) and secrets-mock (plaintext) listeners are
//! bound up front and then served by one spawned task. When either one exits, the other is shut down and the
//! first error is returned.

use std::future::Future;
use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::sync::Arc;

use axum_server::Handle;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::{SHUTDOWN_GRACE_PERIOD, SimConfig};
use crate::error::{Error, Result, ServerKind};
use crate::state::SimState;
use crate::{scheduler, secrets};

/// Both listeners, bound and serving
pub struct RunningServers {
    scheduler_addr: SocketAddr,
    secrets_addr: SocketAddr,
    scheduler: Handle,
    secrets: Handle,
    state: Arc<SimState>,
    task: JoinHandle<Result<()>>,
}

/// Start both listeners.
///
/// Returns once both are bound. Certificate problems are reported before
/// anything binds; if either listener fails to bind, nothing is served and
/// the bind error is returned.
pub async fn start(config: SimConfig) -> Result<RunningServers> {
    // Only the first install in a process succeeds; later calls are no-ops.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let tls = scheduler::load_tls_config(&config.tls_cert_path, &config.tls_key_path).await?;

    let (scheduler_listener, scheduler_addr) =
        bind(ServerKind::Scheduler, config.scheduler_addr).await?;
    let (secrets_listener, secrets_addr) = bind(ServerKind::Secrets, config.secrets_addr).await?;

    let state = Arc::new(SimState::new(&config));
    let scheduler_handle = Handle::new();
    let secrets_handle = Handle::new();

    let scheduler_server = scheduler::serve(
        scheduler_listener,
        tls,
        state.clone(),
        scheduler_handle.clone(),
    );
    let secrets_server = secrets::serve(secrets_listener, state.clone(), secrets_handle.clone());

    let task = tokio::spawn(supervise(
        scheduler_server,
        secrets_server,
        scheduler_handle.clone(),
        secrets_handle.clone(),
    ));

    info!(
        scheduler = %scheduler_addr,
        secrets = %secrets_addr,
        "Simulation servers listening"
    );

    Ok(RunningServers {
        scheduler_addr,
        secrets_addr,
        scheduler: scheduler_handle,
        secrets: secrets_handle,
        state,
        task,
    })
}

/// Bind one listener and hand it over in the non-blocking mode the server
/// expects
async fn bind(server: ServerKind, addr: SocketAddr) -> Result<(StdTcpListener, SocketAddr)> {
    let serve_error = |source| Error::Serve { server, source };

    let listener = TcpListener::bind(addr).await.map_err(serve_error)?;
    let local_addr = listener.local_addr().map_err(serve_error)?;
    let listener = listener.into_std().map_err(serve_error)?;

    Ok((listener, local_addr))
}

/// Start both listeners and serve until one fails or `shutdown` completes
pub async fn run<F>(config: SimConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    start(config).await?.run_until(shutdown).await
}

impl RunningServers {
    /// Bound address of the scheduler-mock (TLS) listener
    pub fn scheduler_addr(&self) -> SocketAddr {
        self.scheduler_addr
    }

    /// Bound address of the secrets-mock (plaintext) listener
    pub fn secrets_addr(&self) -> SocketAddr {
        self.secrets_addr
    }

    /// Handler state shared by both listeners (request metrics)
    pub fn state(&self) -> &Arc<SimState> {
        &self.state
    }

    /// Ask both listeners to stop, letting in-flight requests finish
    pub fn shutdown(&self) {
        stop_all(&self.scheduler, &self.secrets);
    }

    /// Stop both listeners and wait for them to exit
    pub async fn stop(self) -> Result<()> {
        self.shutdown();
        self.task.await?
    }

    /// Serve until a listener exits or `shutdown` completes, then stop both
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let RunningServers {
            scheduler,
            secrets,
            mut task,
            ..
        } = self;

        tokio::select! {
            joined = &mut task => return joined?,
            () = shutdown => {
                info!("Received shutdown signal, stopping simulation servers");
            }
        }

        stop_all(&scheduler, &secrets);
        task.await?
    }
}

fn stop_all(scheduler: &Handle, secrets: &Handle) {
    scheduler.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
    secrets.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}

/// Wait for the first listener to exit, stop the other, and report the
/// first error.
async fn supervise<S, V>(
    scheduler_server: S,
    secrets_server: V,
    scheduler: Handle,
    secrets: Handle,
) -> Result<()>
where
    S: Future<Output = Result<()>>,
    V: Future<Output = Result<()>>,
{
    tokio::pin!(scheduler_server);
    tokio::pin!(secrets_server);

    tokio::select! {
        first = &mut scheduler_server => {
            report_exit(ServerKind::Scheduler, &first);
            stop_all(&scheduler, &secrets);
            let sibling = secrets_server.await;
            report_exit(ServerKind::Secrets, &sibling);
            first.and(sibling)
        }
        first = &mut secrets_server => {
            report_exit(ServerKind::Secrets, &first);
            stop_all(&scheduler, &secrets);
            let sibling = scheduler_server.await;
            report_exit(ServerKind::Scheduler, &sibling);
            first.and(sibling)
        }
    }
}

fn report_exit(server: ServerKind, result: &Result<()>) {
    match result {
        Ok(()) => info!(server = %server, "Simulation server stopped"),
        Err(e) => error!(server = %server, error = %e, "Simulation server failed"),
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// If a handler cannot be installed, that signal source is ignored.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
