use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use axum::response::IntoResponse;
use gpxviz_rs::error::AppError;
use gpxviz_rs::types::unit::UnitSystem;
use gpxviz_rs::{config::Config, state::AppState};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "X-BOUNDARY-TEST";

fn app() -> Router {
    let config = Config::from_env();
    gpxviz_rs::app(AppState::new(config))
}

fn climb_gpx() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <trk><name>Climb</name><trkseg>
    <trkpt lat="46.0000" lon="7.0000"><ele>100</ele></trkpt>
    <trkpt lat="46.0010" lon="7.0000"><ele>90</ele></trkpt>
    <trkpt lat="46.0020" lon="7.0000"><ele>110</ele></trkpt>
  </trkseg></trk>
</gpx>"#
}

fn flat_gpx() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <trk><trkseg>
    <trkpt lat="52.5200" lon="13.4050"><ele>34.0</ele></trkpt>
    <trkpt lat="52.5205" lon="13.4060"></trkpt>
    <trkpt lat="52.5210" lon="13.4070"><ele>34.0</ele></trkpt>
  </trkseg></trk>
</gpx>"#
}

fn empty_gpx() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"><trk><name>Nothing here</name></trk></gpx>"#
}

fn multipart_body(files: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (file_name, file_body) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\nContent-Type: application/gpx+xml\r\n\r\n{file_body}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json")
}

async fn create_session(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/sessions")
                .method("POST")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["unit"], "metric");
    json["session_id"].as_str().expect("session id").to_string()
}

async fn upload(app: &Router, session_id: &str, files: &[(&str, &str)]) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/sessions/{session_id}/tracks"))
                .method("POST")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(files)))
                .expect("request"),
        )
        .await
        .expect("response")
}

#[tokio::test]
async fn upload_keeps_parseable_files_in_upload_order() {
    let app = app();
    let session_id = create_session(&app).await;

    let response = upload(
        &app,
        &session_id,
        &[
            ("climb.gpx", climb_gpx()),
            ("empty.gpx", empty_gpx()),
            ("notes.txt", "hello"),
            ("flat.gpx", flat_gpx()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["report"]["loaded"], 2);
    assert_eq!(json["report"]["skipped"], 2);

    let tracks = json["tracks"].as_array().expect("tracks");
    let names: Vec<&str> = tracks.iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(names, vec!["climb.gpx", "flat.gpx"]);
    assert_eq!(tracks[0]["point_count"], 3);
    assert_eq!(tracks[0]["elevation_gain_m"].as_f64(), Some(20.0));
    assert_eq!(tracks[1]["point_count"], 2);
    assert_ne!(tracks[0]["color"], tracks[1]["color"]);
}

#[tokio::test]
async fn new_batch_replaces_previous_tracks() {
    let app = app();
    let session_id = create_session(&app).await;

    let first = upload(&app, &session_id, &[("climb.gpx", climb_gpx()), ("flat.gpx", flat_gpx())]).await;
    assert_eq!(first.status(), StatusCode::OK);
    let second = upload(&app, &session_id, &[("flat.gpx", flat_gpx())]).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(json_body(second).await["report"]["generation"], 2);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/sessions/{session_id}/tracks"))
                .method("GET")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let tracks = json["tracks"].as_array().expect("tracks");
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["name"], "flat.gpx");
}

#[tokio::test]
async fn file_without_track_points_leaves_collection_empty() {
    let app = app();
    let session_id = create_session(&app).await;

    let response = upload(&app, &session_id, &[("empty.gpx", empty_gpx())]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["report"]["loaded"], 0);
    assert_eq!(json["report"]["skipped"], 1);
    assert_eq!(json["tracks"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn upload_without_files_is_rejected() {
    let app = app();
    let session_id = create_session(&app).await;

    let response = upload(&app, &session_id, &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_to_unknown_session_is_not_found() {
    let response = upload(&app(), "missing", &[("climb.gpx", climb_gpx())]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_can_start_in_imperial_units() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/sessions")
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"unit":"imperial"}"#))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["unit"], "imperial");
}

#[tokio::test]
async fn invalid_unit_is_rejected() {
    let app = app();
    let session_id = create_session(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/sessions/{session_id}/unit"))
                .method("PUT")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"unit":"nautical"}"#))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn commit_after_newer_batch_is_a_conflict() {
    let state = AppState::new(Config::from_env());
    let session_id = state.create_session(UnitSystem::Metric);

    let stale = state
        .with_session(&session_id, |collection| collection.begin_batch())
        .expect("session");
    state
        .with_session(&session_id, |collection| collection.begin_batch())
        .expect("session");

    let result = state
        .with_session(&session_id, |collection| collection.commit(stale, Vec::new()))
        .expect("session");
    let err = result.map_err(AppError::from).expect_err("stale batch");
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = json_body(response).await;
    assert_eq!(json["error"], "Batch 1 was superseded by batch 2");
}
