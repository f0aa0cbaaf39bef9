//! Server startup.

use std::sync::Arc;

use mailsig_dns::DnsRecordSource;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{AppState, Config, ServerError, router};

/// Loads state from `config` and serves until Ctrl-C.
///
/// # Errors
///
/// Returns `ServerError` if configuration is invalid, the resolver cannot be
/// created, or the listener fails.
pub async fn run(config: &Config) -> Result<(), ServerError> {
    let records = DnsRecordSource::from_system_conf()?;
    let state = AppState::from_config(config, Arc::new(records))?;

    let listener = TcpListener::bind(config.listen).await?;
    info!(
        addr = %config.listen,
        ttl_hours = config.signature_ttl_hours,
        "mailsig server listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("mailsig server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
