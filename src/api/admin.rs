//! Unrestricted CRUD for administrators.
//!
//! Every route here sits behind both the auth and admin middlewares, so
//! handlers never re-check the caller's role. Mutations use the store's
//! ownership-free variants (`owner = None`).

use axum::extract::{Path, Query, State, rejection::QueryRejection};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::blogs::{UpdateBlogRequest, blog_query};
use super::extract::{AppJson, AuthUser};
use super::users::{all_with_follows, conflict_or, ensure_available, with_follows};
use super::validation::{parse_id, validate_content, validate_email, validate_username};
use super::{
    ApiError, ApiResponse, AppState, BlogDto, BlogListQuery, BlogPayload, BlogsPayload,
    CommentDto, CommentPayload, CommentsPayload, DashboardPayload, UserPayload, UsersPayload,
};
use crate::db::UserPatch;
use crate::models::Role;

#[derive(Deserialize)]
pub struct AdminUpdateUserRequest {
    pub id: i32,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct AdminUpdateBlogRequest {
    pub id: i32,
    #[serde(flatten)]
    pub changes: UpdateBlogRequest,
}

#[derive(Deserialize)]
pub struct AdminUpdateCommentRequest {
    pub id: i32,
    pub content: String,
}

/// GET /api/admin/dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<DashboardPayload>, ApiError> {
    let dashboard = state.store().dashboard_counts().await?;
    Ok(ApiResponse::success(
        "Dashboard data retrieved successfully",
        DashboardPayload { dashboard },
    ))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<UsersPayload>, ApiError> {
    let users = all_with_follows(state.store()).await?;
    Ok(ApiResponse::success(
        "Users retrieved successfully",
        UsersPayload { users },
    ))
}

/// GET /api/admin/user/{user_id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<UserPayload>, ApiError> {
    let user_id = parse_id(&user_id, "user")?;

    let user = state
        .store()
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let user = with_follows(state.store(), user).await?;
    Ok(ApiResponse::success(
        "User retrieved successfully",
        UserPayload { user },
    ))
}

/// PUT /api/admin/user
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    AppJson(payload): AppJson<AdminUpdateUserRequest>,
) -> Result<ApiResponse<UserPayload>, ApiError> {
    let store = state.store();

    let patch = UserPatch {
        username: payload.username.as_deref().map(validate_username).transpose()?,
        email: payload.email.as_deref().map(validate_email).transpose()?,
        role: payload.role,
        ..UserPatch::default()
    };

    if patch.is_empty() {
        return Err(ApiError::validation("No fields to update"));
    }

    ensure_available(
        store,
        payload.id,
        patch.username.as_deref(),
        patch.email.as_deref(),
    )
    .await?;

    let user = store
        .update_user(payload.id, patch)
        .await
        .map_err(conflict_or)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(admin_id = admin.id, user_id = user.id, "Admin updated user");

    let user = with_follows(store, user).await?;
    Ok(ApiResponse::success(
        "User updated successfully",
        UserPayload { user },
    ))
}

/// DELETE /api/admin/user/{user_id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let user_id = parse_id(&user_id, "user")?;

    if !state.store().delete_user(user_id).await? {
        return Err(ApiError::not_found("User not found"));
    }

    info!(admin_id = admin.id, user_id, "Admin deleted user");
    Ok(ApiResponse::message("User deleted successfully"))
}

// ============================================================================
// Blogs
// ============================================================================

/// GET /api/admin/blogs
pub async fn list_blogs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BlogListQuery>, QueryRejection>,
) -> Result<ApiResponse<BlogsPayload>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let blogs = state.store().list_blogs(blog_query(query)?).await?;

    Ok(ApiResponse::success(
        "Blogs retrieved successfully",
        BlogsPayload {
            blogs: blogs.into_iter().map(BlogDto::from).collect(),
        },
    ))
}

/// GET /api/admin/blog/{blog_id}
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(blog_id): Path<String>,
) -> Result<ApiResponse<BlogPayload>, ApiError> {
    let blog_id = parse_id(&blog_id, "blog")?;

    let blog = state
        .store()
        .get_blog(blog_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    Ok(ApiResponse::success(
        "Blog retrieved successfully",
        BlogPayload {
            blog: BlogDto::from(blog),
        },
    ))
}

/// PUT /api/admin/blog
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    AppJson(payload): AppJson<AdminUpdateBlogRequest>,
) -> Result<ApiResponse<BlogPayload>, ApiError> {
    let patch = payload.changes.into_patch()?;

    let blog = state
        .store()
        .update_blog(payload.id, None, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    info!(admin_id = admin.id, blog_id = blog.id, "Admin updated blog");

    Ok(ApiResponse::success(
        "Blog updated successfully",
        BlogPayload {
            blog: BlogDto::from(blog),
        },
    ))
}

/// DELETE /api/admin/blog/{blog_id}
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    Path(blog_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let blog_id = parse_id(&blog_id, "blog")?;

    if !state.store().delete_blog(blog_id, None).await? {
        return Err(ApiError::not_found("Blog not found"));
    }

    info!(admin_id = admin.id, blog_id, "Admin deleted blog");
    Ok(ApiResponse::message("Blog deleted successfully"))
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/admin/comments
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<CommentsPayload>, ApiError> {
    let comments = state.store().list_comments().await?;

    Ok(ApiResponse::success(
        "Comments retrieved successfully",
        CommentsPayload {
            comments: comments.into_iter().map(CommentDto::from).collect(),
        },
    ))
}

/// PUT /api/admin/comment
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    AppJson(payload): AppJson<AdminUpdateCommentRequest>,
) -> Result<ApiResponse<CommentPayload>, ApiError> {
    let content = validate_content(&payload.content, "Comment")?;

    let comment = state
        .store()
        .update_comment(payload.id, None, &content)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    info!(admin_id = admin.id, comment_id = comment.id, "Admin updated comment");

    Ok(ApiResponse::success(
        "Comment updated successfully",
        CommentPayload {
            comment: CommentDto::from(comment),
        },
    ))
}

/// DELETE /api/admin/comment/{comment_id}
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    Path(comment_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let comment_id = parse_id(&comment_id, "comment")?;

    if !state.store().delete_comment(comment_id, None).await? {
        return Err(ApiError::not_found("Comment not found"));
    }

    info!(admin_id = admin.id, comment_id, "Admin deleted comment");
    Ok(ApiResponse::message("Comment deleted successfully"))
}
