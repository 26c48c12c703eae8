pub mod collection;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod types;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes without the static front-end fallback.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::sessions::router())
        .merge(routes::tracks::router())
        .merge(routes::views::router())
        .merge(routes::export::router())
}

pub fn app(state: AppState) -> Router {
    let web_root = state.config.web_root.clone();
    let serve_dir = ServeDir::new(&web_root)
        .not_found_service(ServeFile::new(web_root.join("index.html")));

    api_router()
        .fallback_service(serve_dir)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(state.config.max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
