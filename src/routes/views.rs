use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::pipeline::{prepare, rasterize, render};
use crate::state::AppState;
use crate::types::view::{ChartView, MapView, OutputConfig, RenderOptions, SummaryView};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sessions/:session_id/chart", get(chart))
        .route("/api/sessions/:session_id/chart.png", get(chart_png))
        .route("/api/sessions/:session_id/map", get(map))
        .route("/api/sessions/:session_id/summary", get(summary))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartImageQuery {
    width: Option<u32>,
    height: Option<u32>,
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), AppError> {
    const MIN_DIM: u32 = 320;
    const MAX_DIM: u32 = 4096;
    const MAX_MEGAPIXELS: f64 = 10.0;

    if !(MIN_DIM..=MAX_DIM).contains(&width) || !(MIN_DIM..=MAX_DIM).contains(&height) {
        return Err(AppError::BadRequest(format!(
            "Invalid dimensions: {}x{}. Width/height must be between {} and {}",
            width, height, MIN_DIM, MAX_DIM
        )));
    }

    let megapixels = (width as f64 * height as f64) / 1_000_000.0;
    if megapixels > MAX_MEGAPIXELS {
        return Err(AppError::BadRequest(format!(
            "Image too large: {}x{} ({:.2} MP). Max allowed is {:.1} MP",
            width, height, megapixels, MAX_MEGAPIXELS
        )));
    }

    Ok(())
}

fn chart_snapshot(state: &AppState, session_id: &str) -> Result<ChartView, AppError> {
    state
        .with_session(session_id, |collection| {
            prepare::chart_view(collection.tracks(), collection.unit())
        })
        .ok_or_else(|| AppError::NotFound(session_id.to_string()))
}

async fn chart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ChartView>, AppError> {
    Ok(Json(chart_snapshot(&state, &session_id)?))
}

async fn chart_png(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<ChartImageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut options = RenderOptions::default();
    match (query.width, query.height) {
        (Some(width), Some(height)) => {
            validate_dimensions(width, height)?;
            options.width = width;
            options.height = height;
        }
        (None, None) => {}
        _ => {
            return Err(AppError::BadRequest(
                "Both width and height must be provided together".to_string(),
            ))
        }
    }

    let chart = chart_snapshot(&state, &session_id)?;

    tracing::info!(
        "Rendering elevation chart for session {} ({}x{}, {} series)",
        session_id,
        options.width,
        options.height,
        chart.series.len()
    );

    let svg = render::render_chart_svg(&chart, &options)?;
    let output_config = OutputConfig {
        width: options.width,
        height: options.height,
        background: Some((255, 255, 255, 255)),
    };
    let image_bytes = rasterize::rasterize(&svg, &output_config)?;

    tracing::info!("Generated PNG: {} bytes", image_bytes.len());

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/png")],
        image_bytes,
    ))
}

async fn map(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<MapView>, AppError> {
    state
        .with_session(&session_id, |collection| prepare::map_view(collection.tracks()))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(session_id))
}

async fn summary(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SummaryView>, AppError> {
    state
        .with_session(&session_id, |collection| {
            prepare::summary_view(collection.tracks(), collection.unit())
        })
        .map(Json)
        .ok_or_else(|| AppError::NotFound(session_id))
}
