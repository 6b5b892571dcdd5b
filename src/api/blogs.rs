use axum::extract::{Path, Query, State, rejection::QueryRejection};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::{AppJson, AuthUser};
use super::validation::{
    DEFAULT_PER_PAGE, parse_id, validate_content, validate_page, validate_per_page, validate_title,
};
use super::{
    ApiError, ApiResponse, AppState, BlogDetailPayload, BlogDto, BlogListQuery, BlogPayload,
    BlogsPayload, UserDto, ViewDto, ViewPayload,
};
use crate::db::{BlogPatch, BlogQuery};

#[derive(Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateBlogRequest {
    pub(super) fn into_patch(self) -> Result<BlogPatch, ApiError> {
        let patch = BlogPatch {
            title: self.title.as_deref().map(validate_title).transpose()?,
            content: self
                .content
                .as_deref()
                .map(|c| validate_content(c, "Content"))
                .transpose()?,
        };

        if patch.title.is_none() && patch.content.is_none() {
            return Err(ApiError::validation("No fields to update"));
        }
        Ok(patch)
    }
}

pub(super) fn blog_query(query: BlogListQuery) -> Result<BlogQuery, ApiError> {
    Ok(BlogQuery {
        author_id: query.author_id,
        page: query.page.map(validate_page).transpose()?,
        per_page: validate_per_page(query.per_page.unwrap_or(DEFAULT_PER_PAGE))?,
    })
}

/// GET /api/blog, /api/blog/all
pub async fn list_blogs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BlogListQuery>, QueryRejection>,
) -> Result<ApiResponse<BlogsPayload>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let blogs = state.store().list_blogs(blog_query(query)?).await?;

    Ok(ApiResponse::success(
        "Blogs fetched successfully",
        BlogsPayload {
            blogs: blogs.into_iter().map(BlogDto::from).collect(),
        },
    ))
}

/// POST /api/blog
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppJson(payload): AppJson<CreateBlogRequest>,
) -> Result<ApiResponse<BlogPayload>, ApiError> {
    let title = validate_title(&payload.title)?;
    let content = validate_content(&payload.content, "Content")?;

    let blog = state
        .store()
        .create_blog(auth.id, &auth.username, &title, &content)
        .await?;

    Ok(ApiResponse::created(
        "Blog created successfully",
        BlogPayload {
            blog: BlogDto::from(blog),
        },
    ))
}

/// GET /api/blog/b/{blog_id}
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(blog_id): Path<String>,
) -> Result<ApiResponse<BlogDetailPayload>, ApiError> {
    let blog_id = parse_id(&blog_id, "blog")?;
    let store = state.store();

    let blog = store
        .get_blog(blog_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    let user = store.get_user(blog.user_id).await?.map(UserDto::from);
    let like_count = store.like_count(blog_id).await?;
    let view_count = store.view_count(blog_id).await?;

    Ok(ApiResponse::success(
        "Blog fetched successfully",
        BlogDetailPayload {
            blog: BlogDto::from(blog),
            user,
            like_count,
            view_count,
        },
    ))
}

/// PUT /api/blog/b/{blog_id}
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(blog_id): Path<String>,
    AppJson(payload): AppJson<UpdateBlogRequest>,
) -> Result<ApiResponse<BlogPayload>, ApiError> {
    let blog_id = parse_id(&blog_id, "blog")?;
    let patch = payload.into_patch()?;

    let blog = state
        .store()
        .update_blog(blog_id, Some(auth.id), patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found or not owned by user"))?;

    Ok(ApiResponse::success(
        "Blog updated successfully",
        BlogPayload {
            blog: BlogDto::from(blog),
        },
    ))
}

/// DELETE /api/blog/b/{blog_id}
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(blog_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let blog_id = parse_id(&blog_id, "blog")?;

    if !state.store().delete_blog(blog_id, Some(auth.id)).await? {
        return Err(ApiError::not_found("Blog not found or not owned by user"));
    }

    Ok(ApiResponse::message("Blog deleted successfully"))
}

/// POST /api/blog/{blog_id}/view
pub async fn record_view(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(blog_id): Path<String>,
) -> Result<ApiResponse<ViewPayload>, ApiError> {
    let blog_id = parse_id(&blog_id, "blog")?;
    let store = state.store();

    if store.get_blog(blog_id).await?.is_none() {
        return Err(ApiError::not_found("Blog not found"));
    }

    let (view, created) = store.record_view(auth.id, blog_id).await?;
    let message = if created {
        "View recorded successfully"
    } else {
        "View already recorded"
    };

    Ok(ApiResponse::success(
        message,
        ViewPayload {
            view: ViewDto::from(view),
            created,
        },
    ))
}
