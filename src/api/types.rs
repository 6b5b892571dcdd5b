use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::db::{Blog, Comment, DashboardCounts, FollowLists, Like, User, View};
use crate::models::Role;

/// Envelope shared by every JSON response, successful or not.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, data)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            success: status.is_success(),
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            success: false,
            message: Some(message.into()),
            data: None,
            error: detail,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Sanitized user: never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub pfp: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<Vec<i32>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            pfp: user.pfp,
            created_at: user.created_at,
            updated_at: user.updated_at,
            followers: None,
            following: None,
        }
    }
}

impl UserDto {
    #[must_use]
    pub fn with_follows(mut self, lists: FollowLists) -> Self {
        self.followers = Some(lists.followers);
        self.following = Some(lists.following);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Blog> for BlogDto {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            user_id: blog.user_id,
            author: blog.author,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentDto {
    pub id: i32,
    pub content: String,
    pub user_id: i32,
    pub author: String,
    pub blog_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            user_id: comment.user_id,
            author: comment.author,
            blog_id: comment.blog_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LikeDto {
    pub id: i32,
    pub user_id: i32,
    pub blog_id: i32,
    pub created_at: String,
}

impl From<Like> for LikeDto {
    fn from(like: Like) -> Self {
        Self {
            id: like.id,
            user_id: like.user_id,
            blog_id: like.blog_id,
            created_at: like.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewDto {
    pub id: i32,
    pub user_id: i32,
    pub blog_id: i32,
    pub created_at: String,
}

impl From<View> for ViewDto {
    fn from(view: View) -> Self {
        Self {
            id: view.id,
            user_id: view.user_id,
            blog_id: view.blog_id,
            created_at: view.created_at,
        }
    }
}

// ============================================================================
// Payloads (the `data` member, keyed by resource name)
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: UserDto,
}

/// Another user's profile, seen by the caller.
#[derive(Debug, Serialize)]
pub struct UserProfilePayload {
    pub user: UserDto,
    /// Whether the caller follows this user; always false on the caller's own profile.
    pub is_following: bool,
}

#[derive(Debug, Serialize)]
pub struct UsersPayload {
    pub users: Vec<UserDto>,
}

#[derive(Debug, Serialize)]
pub struct BlogPayload {
    pub blog: BlogDto,
}

#[derive(Debug, Serialize)]
pub struct BlogsPayload {
    pub blogs: Vec<BlogDto>,
}

/// Single blog with its author and engagement counters.
#[derive(Debug, Serialize)]
pub struct BlogDetailPayload {
    pub blog: BlogDto,
    pub user: Option<UserDto>,
    pub like_count: u64,
    pub view_count: u64,
}

#[derive(Debug, Serialize)]
pub struct CommentPayload {
    pub comment: CommentDto,
}

#[derive(Debug, Serialize)]
pub struct CommentsPayload {
    pub comments: Vec<CommentDto>,
}

#[derive(Debug, Serialize)]
pub struct LikePayload {
    pub like: LikeDto,
}

#[derive(Debug, Serialize)]
pub struct ViewPayload {
    pub view: ViewDto,
    pub created: bool,
}

#[derive(Debug, Serialize)]
pub struct FollowStatePayload {
    pub following: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardPayload {
    pub dashboard: DashboardCounts,
}

#[derive(Debug, Serialize)]
pub struct HealthPayload {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    pub uptime_secs: u64,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct BlogIdRequest {
    pub blog_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlogListQuery {
    pub author_id: Option<i32>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}
