use std::net::SocketAddr;
use std::sync::Arc;
use talentflow_backend::{
    app,
    config::{get_config, init_config},
    database::{memory::MemoryStore, seed::seed_if_empty, store::Store},
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    init_config()?;
    let config = get_config();

    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    if config.seed_on_start {
        seed_if_empty(store.as_ref(), &config.share_base_url).await?;
    }

    let app_state = AppState::new(store, config);
    info!(
        min_delay_ms = config.network_min_delay_ms,
        max_delay_ms = config.network_max_delay_ms,
        failure_rate = config.network_failure_rate,
        "Network simulation enabled"
    );

    let router = app(app_state, config.cors_allowed_origin.as_deref());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
