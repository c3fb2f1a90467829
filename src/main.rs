use tracing::{error, Instrument};
use vehicle_validation_gateway::{
    logging::{init_logging, process_span},
    server::run,
    GatewayConfig, GatewayError,
};

async fn serve() -> Result<(), GatewayError> {
    let config = GatewayConfig::from_env()?;
    run(config).await
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = serve().instrument(process_span()).await {
        error!(error = %e, "Gateway failed");
        std::process::exit(1);
    }
}
