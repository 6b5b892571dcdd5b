use axum::extract::State;
use std::sync::Arc;

use super::extract::{AppJson, AuthUser};
use super::{ApiError, ApiResponse, AppState, BlogIdRequest, LikeDto, LikePayload};

/// POST /api/blog/like
pub async fn like_blog(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppJson(payload): AppJson<BlogIdRequest>,
) -> Result<ApiResponse<LikePayload>, ApiError> {
    let store = state.store();

    if store.get_blog(payload.blog_id).await?.is_none() {
        return Err(ApiError::not_found("Blog not found"));
    }

    if !store.like_blog(auth.id, payload.blog_id).await? {
        return Err(ApiError::conflict("You have already liked this blog"));
    }

    // The row can vanish if the blog is deleted concurrently.
    let like = store
        .get_like(auth.id, payload.blog_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    Ok(ApiResponse::created(
        "Blog liked successfully",
        LikePayload {
            like: LikeDto::from(like),
        },
    ))
}

/// DELETE /api/blog/unlike
pub async fn unlike_blog(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppJson(payload): AppJson<BlogIdRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    if !state.store().unlike_blog(auth.id, payload.blog_id).await? {
        return Err(ApiError::not_found("You have not liked this blog"));
    }

    Ok(ApiResponse::message("Blog unliked successfully"))
}
