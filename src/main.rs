use gpxviz_rs::{config, state};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gpxviz_rs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();
    let state = state::AppState::new(config.clone());

    // Start session eviction task
    let eviction_state = state.clone();
    let eviction_ttl = config.cache_ttl;
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await; // Every 5 minutes
            eviction_state.evict_expired(eviction_ttl);
        }
    });

    let app = gpxviz_rs::app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("GPX viewer listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Sessions: POST http://{}/api/sessions", addr);
    tracing::info!("Upload: POST http://{}/api/sessions/:id/tracks", addr);

    axum::serve(listener, app).await.unwrap();
}
