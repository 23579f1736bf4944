use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use export_tenant_data::build_dispatcher;
use tenant_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize telemetry
    tenant_shared::telemetry::init_telemetry();

    info!("Local tenant server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let dispatcher = Arc::new(build_dispatcher(&config).await?);
    let app = tenant_api::handlers::router(dispatcher);

    // Bind address
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
