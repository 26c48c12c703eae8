use axum::extract::Multipart;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::collection::BatchReport;
use crate::error::AppError;
use crate::pipeline::ingest;
use crate::state::AppState;
use crate::types::track::{RawFile, Track};
use crate::types::unit::UnitSystem;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/sessions/:session_id/tracks",
        post(upload_tracks).get(list_tracks),
    )
}

#[derive(Serialize, Deserialize)]
struct TrackInfo {
    name: String,
    color: String,
    point_count: usize,
    distance_km: f64,
    elevation_gain_m: f64,
}

impl From<&Track> for TrackInfo {
    fn from(track: &Track) -> Self {
        Self {
            name: track.name.clone(),
            color: track.color.clone(),
            point_count: track.points.len(),
            distance_km: track.distance_km,
            elevation_gain_m: track.elevation_gain_m,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct UploadResponse {
    session_id: String,
    report: BatchReport,
    tracks: Vec<TrackInfo>,
}

#[derive(Serialize, Deserialize)]
struct TrackListResponse {
    session_id: String,
    unit: UnitSystem,
    tracks: Vec<TrackInfo>,
}

async fn upload_tracks(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read file bytes: {}", e))
        })?;
        files.push(RawFile::new(filename, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files provided".to_string()));
    }

    let token = state
        .with_session(&session_id, |collection| collection.begin_batch())
        .ok_or_else(|| AppError::NotFound(session_id.clone()))?;

    tracing::info!(
        "Loading {} file(s) into session {} (batch {})",
        files.len(),
        session_id,
        token.generation()
    );

    let results = tokio::task::spawn_blocking(move || ingest::ingest(&files))
        .await
        .map_err(|e| AppError::Internal(format!("Ingest task failed: {}", e)))?;

    let (report, tracks) = state
        .with_session(&session_id, |collection| {
            collection.commit(token, results).map(|report| {
                let tracks: Vec<TrackInfo> = collection.tracks().iter().map(TrackInfo::from).collect();
                (report, tracks)
            })
        })
        .ok_or_else(|| AppError::NotFound(session_id.clone()))??;

    tracing::info!(
        "Session {} batch {}: {} track(s) loaded, {} file(s) skipped",
        session_id,
        report.generation,
        report.loaded,
        report.skipped
    );

    Ok(Json(UploadResponse {
        session_id,
        report,
        tracks,
    }))
}

async fn list_tracks(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<TrackListResponse>, AppError> {
    let (unit, tracks) = state
        .with_session(&session_id, |collection| {
            let tracks: Vec<TrackInfo> = collection.tracks().iter().map(TrackInfo::from).collect();
            (collection.unit(), tracks)
        })
        .ok_or_else(|| AppError::NotFound(session_id.clone()))?;

    Ok(Json(TrackListResponse {
        session_id,
        unit,
        tracks,
    }))
}
