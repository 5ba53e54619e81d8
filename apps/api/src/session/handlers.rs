use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::session::controller::{CopyKind, CopyView, SessionView};
use crate::session::state::ProfilePatch;
use crate::state::AppState;

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.view().await)
}

/// PATCH /api/v1/session/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> Json<SessionView> {
    Json(state.session.update_profile(patch).await)
}

/// POST /api/v1/session/generate
///
/// Replaces the calendar. Failures come back as a notification, not an HTTP error.
pub async fn handle_generate(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.submit().await)
}

/// POST /api/v1/session/posts/:index/optimize
pub async fn handle_optimize_post(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.session.optimize_post(index).await?))
}

/// GET /api/v1/session/posts/:index/copy/:kind
pub async fn handle_copy(
    State(state): State<AppState>,
    Path((index, kind)): Path<(usize, String)>,
) -> Result<Json<CopyView>, AppError> {
    let kind: CopyKind = kind.parse()?;
    Ok(Json(state.session.copy_text(index, kind).await?))
}

/// GET /api/v1/session/posts/:index/image
///
/// Streams the card's image back as an attachment named `postcraft-image-<n>.png`.
pub async fn handle_download_image(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Response, AppError> {
    let download = state.session.download_image(index).await?;
    let disposition = format!("attachment; filename=\"{}\"", download.filename);

    Ok((
        [
            (header::CONTENT_TYPE, download.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.bytes,
    )
        .into_response())
}
