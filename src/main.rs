use kleingroepe::{
    build_router,
    config::CONFIG,
    constants::APP_NAME,
    core::services::KleingroepeService,
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
    },
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Starting with {:?}", *CONFIG);

    // Initialize storage, logging and cache
    let cache = InMemoryCache::new();
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let service = KleingroepeService::new(storage, logging, cache, CONFIG.jwt_secret.clone())
        .with_directory_ttl(Duration::from_secs(CONFIG.directory_cache_ttl_secs));

    match (&CONFIG.admin_email, &CONFIG.admin_password) {
        (Some(email), Some(password)) => {
            service.ensure_admin(&CONFIG.admin_name, email, password).await?;
        }
        _ => warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set; no administrator can sign in"),
    }

    let app = build_router(Arc::new(service));

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("{} server running at http://{}", APP_NAME, addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
