use axum::extract::{Path, State};
use std::sync::Arc;

use super::extract::{AppJson, AuthUser};
use super::validation::{parse_id, validate_content};
use super::{
    ApiError, ApiResponse, AppState, CommentDto, CommentPayload, CommentRequest, CommentsPayload,
};

const NOT_OWNED: &str = "Comment not found or not owned by user";

/// GET /api/blog/{blog_id}/comments
pub async fn list_blog_comments(
    State(state): State<Arc<AppState>>,
    Path(blog_id): Path<String>,
) -> Result<ApiResponse<CommentsPayload>, ApiError> {
    let blog_id = parse_id(&blog_id, "blog")?;
    let store = state.store();

    if store.get_blog(blog_id).await?.is_none() {
        return Err(ApiError::not_found("Blog not found"));
    }

    let comments = store.list_comments_for_blog(blog_id).await?;

    Ok(ApiResponse::success(
        "Comments retrieved successfully",
        CommentsPayload {
            comments: comments.into_iter().map(CommentDto::from).collect(),
        },
    ))
}

/// POST /api/blog/{blog_id}/comments
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(blog_id): Path<String>,
    AppJson(payload): AppJson<CommentRequest>,
) -> Result<ApiResponse<CommentPayload>, ApiError> {
    let blog_id = parse_id(&blog_id, "blog")?;
    let content = validate_content(&payload.content, "Comment")?;
    let store = state.store();

    if store.get_blog(blog_id).await?.is_none() {
        return Err(ApiError::not_found("Blog not found"));
    }

    let comment = store
        .create_comment(blog_id, auth.id, &auth.username, &content)
        .await?;

    Ok(ApiResponse::created(
        "Comment created successfully",
        CommentPayload {
            comment: CommentDto::from(comment),
        },
    ))
}

/// GET /api/comment/{comment_id}
pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> Result<ApiResponse<CommentPayload>, ApiError> {
    let comment_id = parse_id(&comment_id, "comment")?;

    let comment = state
        .store()
        .get_comment(comment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    Ok(ApiResponse::success(
        "Comment retrieved successfully",
        CommentPayload {
            comment: CommentDto::from(comment),
        },
    ))
}

/// PUT /api/comment/{comment_id}
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
    AppJson(payload): AppJson<CommentRequest>,
) -> Result<ApiResponse<CommentPayload>, ApiError> {
    let comment_id = parse_id(&comment_id, "comment")?;
    let content = validate_content(&payload.content, "Comment")?;

    let comment = state
        .store()
        .update_comment(comment_id, Some(auth.id), &content)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_OWNED))?;

    Ok(ApiResponse::success(
        "Comment updated successfully",
        CommentPayload {
            comment: CommentDto::from(comment),
        },
    ))
}

/// DELETE /api/comment/{comment_id}
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let comment_id = parse_id(&comment_id, "comment")?;

    if !state
        .store()
        .delete_comment(comment_id, Some(auth.id))
        .await?
    {
        return Err(ApiError::not_found(NOT_OWNED));
    }

    Ok(ApiResponse::message("Comment deleted successfully"))
}
