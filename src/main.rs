//! Entry point: load config, wire the hub, and run the broadcast server.

use statuscast::config::ServerConfig;
use statuscast::{create_app, AppState, BroadcastHub, EventCoalescer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let hub = BroadcastHub::new(env!("CARGO_PKG_VERSION"));
    let coalescer = EventCoalescer::start(hub.clone(), config.ammo_coalesce);
    let state = AppState { hub, coalescer };
    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
