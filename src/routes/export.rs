use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::error::AppError;
use crate::pipeline::export::{self, CSV_CONTENT_TYPE, CSV_FILENAME};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/sessions/:session_id/export", get(export_csv))
}

async fn export_csv(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (csv, track_count) = state
        .with_session(&session_id, |collection| {
            (export::to_csv(collection.tracks(), collection.unit()), collection.len())
        })
        .ok_or_else(|| AppError::NotFound(session_id.clone()))?;

    tracing::info!("Exported {} track(s) from session {}", track_count, session_id);

    let disposition = format!("attachment; filename=\"{}\"", CSV_FILENAME);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
