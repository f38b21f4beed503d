//! backend-sim - simulated scheduler and secrets-store HTTP APIs.
//!
//! This is the main entry point that:
//! - Initializes structured logging
//! - Reads listener configuration from flags or the environment
//! - Runs both simulation servers until one fails or a shutdown signal arrives

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use backend_sim::config::{
    DEFAULT_SECRET_WRITE_DELAY, DEFAULT_TLS_CERT_PATH, DEFAULT_TLS_KEY_PATH, DEFAULT_WORK_DELAY,
};
use backend_sim::{SimConfig, run, shutdown_signal};

#[derive(Debug, Parser)]
#[command(
    name = "backend-sim",
    version,
    about = "Simulated scheduler (TLS) and secrets-store (plaintext) HTTP APIs"
)]
struct Cli {
    /// Scheduler-mock (TLS) bind address
    #[arg(long, env = "SIM_SCHEDULER_ADDR", default_value = "0.0.0.0:8080")]
    scheduler_addr: SocketAddr,
    /// Secrets-mock (plaintext) bind address
    #[arg(long, env = "SIM_SECRETS_ADDR", default_value = "0.0.0.0:8200")]
    secrets_addr: SocketAddr,
    /// Scheduler TLS certificate (PEM)
    #[arg(long, env = "SIM_TLS_CERT", default_value = DEFAULT_TLS_CERT_PATH)]
    tls_cert: PathBuf,
    /// Scheduler TLS private key (PEM)
    #[arg(long, env = "SIM_TLS_KEY", default_value = DEFAULT_TLS_KEY_PATH)]
    tls_key: PathBuf,
    /// Artificial latency for scheduler job endpoints, in milliseconds
    #[arg(long, env = "SIM_WORK_DELAY_MS", default_value_t = DEFAULT_WORK_DELAY.as_millis() as u64)]
    work_delay_ms: u64,
    /// Artificial latency for secret writes, in milliseconds
    #[arg(long, env = "SIM_SECRET_WRITE_DELAY_MS", default_value_t = DEFAULT_SECRET_WRITE_DELAY.as_millis() as u64)]
    secret_write_delay_ms: u64,
}

impl From<Cli> for SimConfig {
    fn from(cli: Cli) -> Self {
        SimConfig {
            scheduler_addr: cli.scheduler_addr,
            secrets_addr: cli.secrets_addr,
            tls_cert_path: cli.tls_cert,
            tls_key_path: cli.tls_key,
            work_delay: Duration::from_millis(cli.work_delay_ms),
            secret_write_delay: Duration::from_millis(cli.secret_write_delay_ms),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("backend_sim=info".parse()?),
        )
        .json()
        .init();

    let config = SimConfig::from(Cli::parse());
    info!(
        scheduler_addr = %config.scheduler_addr,
        secrets_addr = %config.secrets_addr,
        tls_cert = %config.tls_cert_path.display(),
        "Starting backend-sim"
    );

    run(config, shutdown_signal()).await?;

    info!("backend-sim stopped");
    Ok(())
}
