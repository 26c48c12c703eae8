use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid GPX: {0}")]
    InvalidGpx(String),
    #[error("No track points found in file")]
    EmptyFile,
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Batch {token} was superseded by batch {current}")]
    StaleBatch { token: u64, current: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("SVG generation failed: {0}")]
    SvgError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("PNG rendering failed: {0}")]
    RenderFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Collection(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Render(_) | AppError::Raster(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
