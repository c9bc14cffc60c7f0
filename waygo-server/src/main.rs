use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use waygo_server::auth::AuthClient;
use waygo_server::cache::{CacheConfig, CachedTransportClient};
use waygo_server::config::AppConfig;
use waygo_server::state::AppStore;
use waygo_server::storage::{FileStore, Storage};
use waygo_server::transport::TransportClient;
use waygo_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("waygo_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Transit lookups go through the cache, which also owns the fallback
    let transport_client = TransportClient::new(config.transport.clone())?;
    let transit = CachedTransportClient::new(Arc::new(transport_client), &CacheConfig::default());

    let accounts = AuthClient::new(config.auth.clone())?;

    info!(dir = %config.data_dir.display(), "using data directory");
    let storage = Storage::new(Arc::new(FileStore::new(&config.data_dir)));

    let store = AppStore::new(storage, transit, Arc::new(accounts));
    store.hydrate().await;

    let app = create_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "WayGo listening");
    info!("API endpoints:");
    info!("  GET  /health");
    info!("  GET  /api/stops/nearby?lat=&lon=");
    info!("  GET  /api/stops/:atcocode/departures");
    info!("  POST /api/favorites/toggle");
    info!("  POST /api/auth/login");

    axum::serve(listener, app).await?;
    Ok(())
}
