use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use crate::types::unit::UnitSystem;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:session_id/unit", put(set_unit))
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct CreateSessionRequest {
    unit: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UnitRequest {
    unit: String,
}

#[derive(Serialize, Deserialize)]
struct SessionResponse {
    session_id: String,
    unit: UnitSystem,
    track_count: usize,
}

fn parse_unit(value: &str) -> Result<UnitSystem, AppError> {
    UnitSystem::from_str(value).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid unit: {}. Use 'metric' or 'imperial'",
            value
        ))
    })
}

async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let req: CreateSessionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid session request: {}", e)))?
    };

    let unit = match req.unit.as_deref() {
        Some(value) => parse_unit(value)?,
        None => state.config.default_unit,
    };
    let session_id = state.create_session(unit);

    tracing::info!("Created session {} ({})", session_id, unit.as_str());

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            unit,
            track_count: 0,
        }),
    ))
}

async fn set_unit(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<UnitRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let unit = parse_unit(&req.unit)?;
    let track_count = state
        .with_session(&session_id, |collection| {
            collection.set_unit(unit);
            collection.len()
        })
        .ok_or_else(|| AppError::NotFound(session_id.clone()))?;

    tracing::info!("Session {} switched to {} units", session_id, unit.as_str());

    Ok(Json(SessionResponse {
        session_id,
        unit,
        track_count,
    }))
}
