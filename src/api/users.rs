use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::auth::{cleared_cookie, issue_session};
use super::extract::{AppJson, AuthUser};
use super::validation::{
    parse_id, validate_email, validate_password, validate_pfp, validate_username,
};
use super::{
    ApiError, ApiResponse, AppState, FollowStatePayload, UserDto, UserPayload, UserProfilePayload,
    UsersPayload,
};
use crate::constants::messages;
use crate::db::{Store, User, UserPatch, is_unique_violation};
use crate::security::{hash_password, verify_password};

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub pfp: Option<String>,
    pub password: Option<String>,
    pub current_password: Option<String>,
}

/// Sanitized user with follower/following ids attached.
pub(super) async fn with_follows(store: &Store, user: User) -> Result<UserDto, ApiError> {
    let mut lists = store.follow_lists(&[user.id]).await?;
    let follows = lists.remove(&user.id).unwrap_or_default();
    Ok(UserDto::from(user).with_follows(follows))
}

pub(super) async fn all_with_follows(store: &Store) -> Result<Vec<UserDto>, ApiError> {
    let users = store.list_users().await?;
    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
    let mut lists = store.follow_lists(&ids).await?;

    Ok(users
        .into_iter()
        .map(|user| {
            let follows = lists.remove(&user.id).unwrap_or_default();
            UserDto::from(user).with_follows(follows)
        })
        .collect())
}

/// Reject a username/email already held by another account.
pub(super) async fn ensure_available(
    store: &Store,
    user_id: i32,
    username: Option<&str>,
    email: Option<&str>,
) -> Result<(), ApiError> {
    if let Some(username) = username
        && let Some(existing) = store.get_user_by_username(username).await?
        && existing.id != user_id
    {
        return Err(ApiError::conflict(messages::ACCOUNT_TAKEN));
    }

    if let Some(email) = email
        && let Some(existing) = store.get_user_by_email(email).await?
        && existing.id != user_id
    {
        return Err(ApiError::conflict(messages::ACCOUNT_TAKEN));
    }

    Ok(())
}

/// Map a unique-index violation raised by a racing writer to 409.
pub(super) fn conflict_or(err: anyhow::Error) -> ApiError {
    if is_unique_violation(&err) {
        ApiError::conflict(messages::ACCOUNT_TAKEN)
    } else {
        ApiError::from(err)
    }
}

/// GET /api/user
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<ApiResponse<UserPayload>, ApiError> {
    let user = state
        .store()
        .get_user(auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let user = with_follows(state.store(), user).await?;
    Ok(ApiResponse::success(
        "User retrieved successfully",
        UserPayload { user },
    ))
}

/// GET /api/user/all
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<UsersPayload>, ApiError> {
    let users = all_with_follows(state.store()).await?;
    Ok(ApiResponse::success(
        "Users retrieved successfully",
        UsersPayload { users },
    ))
}

/// GET /api/user/{user_id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<UserProfilePayload>, ApiError> {
    let user_id = parse_id(&user_id, "user")?;
    let store = state.store();

    let user = store
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let is_following = user_id != auth.id && store.is_following(auth.id, user_id).await?;

    let user = with_follows(store, user).await?;
    Ok(ApiResponse::success(
        "User retrieved successfully",
        UserProfilePayload { user, is_following },
    ))
}

/// PUT /api/user
pub async fn update_current_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let config = state.config();
    let store = state.store();

    let mut patch = UserPatch {
        username: payload.username.as_deref().map(validate_username).transpose()?,
        email: payload.email.as_deref().map(validate_email).transpose()?,
        pfp: payload.pfp.as_deref().map(validate_pfp).transpose()?,
        ..UserPatch::default()
    };

    if let Some(password) = payload.password.as_deref() {
        validate_password(password, config.security.min_password_length)?;

        let current = payload
            .current_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::validation("Current password is required"))?;

        let stored = store
            .get_user_password_hash(auth.id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        if !verify_password(current, &stored).await? {
            return Err(ApiError::validation("Current password is incorrect"));
        }

        patch.password_hash = Some(hash_password(password, &config.security).await?);
    }

    if patch.is_empty() {
        return Err(ApiError::validation("No fields to update"));
    }

    ensure_available(
        store,
        auth.id,
        patch.username.as_deref(),
        patch.email.as_deref(),
    )
    .await?;

    let user = store
        .update_user(auth.id, patch)
        .await
        .map_err(conflict_or)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(user_id = user.id, "User updated profile");

    let cookie = issue_session(&state, &user)?;
    let user = with_follows(store, user).await?;

    Ok((
        cookie,
        ApiResponse::success("User updated successfully", UserPayload { user }),
    ))
}

/// DELETE /api/user
pub async fn delete_current_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    if !state.store().delete_user(auth.id).await? {
        return Err(ApiError::not_found("User not found"));
    }

    Ok((
        cleared_cookie(&state),
        ApiResponse::message("User deleted successfully"),
    ))
}

/// POST /api/user/follow/{user_id}
pub async fn follow_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let target = follow_target(&state, &auth, &user_id).await?;

    if !state.store().follow(auth.id, target).await? {
        return Err(ApiError::conflict("You are already following this user"));
    }

    Ok(ApiResponse::message("User followed successfully"))
}

/// DELETE /api/user/unfollow/{user_id}
pub async fn unfollow_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let target = parse_id(&user_id, "user")?;

    if !state.store().unfollow(auth.id, target).await? {
        return Err(ApiError::not_found("You are not following this user"));
    }

    Ok(ApiResponse::message("User unfollowed successfully"))
}

/// POST /api/user/follow/{user_id}/toggle
pub async fn toggle_follow(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<FollowStatePayload>, ApiError> {
    let target = follow_target(&state, &auth, &user_id).await?;

    let following = state.store().toggle_follow(auth.id, target).await?;
    let message = if following {
        "User followed successfully"
    } else {
        "User unfollowed successfully"
    };

    Ok(ApiResponse::success(
        message,
        FollowStatePayload { following },
    ))
}

async fn follow_target(state: &AppState, auth: &AuthUser, raw: &str) -> Result<i32, ApiError> {
    let target = parse_id(raw, "user")?;

    if target == auth.id {
        return Err(ApiError::validation("You cannot follow yourself"));
    }

    if state.store().get_user(target).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(target)
}
