//! Axum route handlers for the action endpoints.
//!
//! Both always answer 200 with a discriminated body; flow failures arrive as `{"error": ...}`.

use axum::{extract::State, Json};

use crate::generation::actions::{ActionResult, GeneratedPosts, OptimizedHashtags};
use crate::generation::hashtags::OptimizePostHashtagsInput;
use crate::models::post::BusinessProfile;
use crate::state::AppState;

/// POST /api/v1/actions/generate-posts
pub async fn handle_generate_posts(
    State(state): State<AppState>,
    Json(profile): Json<BusinessProfile>,
) -> Json<ActionResult<GeneratedPosts>> {
    Json(state.actions.generate_posts(&profile).await)
}

/// POST /api/v1/actions/optimize-hashtags
pub async fn handle_optimize_hashtags(
    State(state): State<AppState>,
    Json(request): Json<OptimizePostHashtagsInput>,
) -> Json<ActionResult<OptimizedHashtags>> {
    Json(
        state
            .actions
            .optimize_hashtags(request.post_copy, request.original_hashtags)
            .await,
    )
}
