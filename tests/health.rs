use axum::{body::to_bytes, http::Request, Router};
use gpxviz_rs::{config::Config, state::AppState};
use tower::ServiceExt;

fn app() -> Router {
    let config = Config::from_env();
    gpxviz_rs::app(AppState::new(config))
}

#[tokio::test]
async fn health_returns_ok() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let text = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(text.contains("\"status\":\"ok\""));
    assert!(text.contains("\"sessions\":0"));
}
