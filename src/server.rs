use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::GatewayConfig;
use crate::errors::GatewayError;
use crate::handlers::routes;
use crate::models::AppState;
use crate::services::acquire_token;

/// Acquires the access token, then binds the listener.
///
/// Nothing is bound unless the token exchange succeeds. Returns the bound
/// address and the server future, which completes once `shutdown` resolves.
pub async fn start<F>(
    config: GatewayConfig,
    shutdown: F,
) -> Result<(SocketAddr, impl Future<Output = ()>), GatewayError>
where
    F: Future<Output = ()> + Send + 'static,
{
    config.validate()?;
    let addr = config.listen_addr()?;
    let client = reqwest::Client::new();

    let token = acquire_token(
        &client,
        &config.token_url,
        &config.client_id,
        &config.client_secret,
    )
    .await?;
    info!(
        token_type = %token.token_type(),
        expires_in = token.expires_in(),
        "access token acquired"
    );

    let state = Arc::new(AppState::new(config, token, client));
    warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| GatewayError::Server(e.to_string()))
}

/// Runs the gateway until Ctrl-C.
pub async fn run(config: GatewayConfig) -> Result<(), GatewayError> {
    let (addr, server) = start(config, shutdown_signal()).await?;
    info!("Serving on http://{}", addr);
    server.await;
    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
