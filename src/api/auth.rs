use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::cookie::{Cookie, SameSite};
use tracing::{debug, info};

use super::extract::{AppJson, AuthUser};
use super::validation::{validate_email, validate_password, validate_pfp, validate_username};
use super::{ApiError, ApiResponse, AppState, UserDto, UserPayload};
use crate::constants::{AUTH_COOKIE, messages};
use crate::db::{NewUser, User, is_unique_violation};
use crate::models::Role;
use crate::security::{hash_password, verify_password};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub pfp: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Email address or username
    #[serde(alias = "email", alias = "username")]
    pub identifier: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolve the `auth_token` cookie into an [`AuthUser`].
///
/// The user row is re-read on every request, so a token outliving its
/// account (or an older role) is never trusted.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized(messages::AUTH_REQUIRED))?;

    let claims = state.tokens().verify(&token).map_err(|e| {
        debug!(error = %e, "Rejected session token");
        ApiError::unauthorized(messages::INVALID_SESSION)
    })?;

    let user = state
        .store()
        .get_user(claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized(messages::INVALID_SESSION))?;

    tracing::Span::current().record("user_id", user.id);
    request.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(request).await)
}

/// Must run after [`auth_middleware`].
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let Some(user) = request.extensions().get::<AuthUser>() else {
        return Err(ApiError::unauthorized(messages::AUTH_REQUIRED));
    };

    if !user.role.is_admin() {
        debug!(user_id = user.id, "Non-admin denied");
        return Err(ApiError::Forbidden(messages::ADMIN_REQUIRED.to_string()));
    }

    Ok(next.run(request).await)
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

// ============================================================================
// Cookies
// ============================================================================

pub fn session_cookie(state: &AppState, token: String) -> [(HeaderName, String); 1] {
    let max_age = time::Duration::seconds(state.tokens().ttl().num_seconds());
    let cookie = base_cookie(token, state.config().server.secure_cookies)
        .max_age(max_age)
        .build();
    [(header::SET_COOKIE, cookie.to_string())]
}

pub fn cleared_cookie(state: &AppState) -> [(HeaderName, String); 1] {
    let cookie = base_cookie(String::new(), state.config().server.secure_cookies)
        .max_age(time::Duration::ZERO)
        .build();
    [(header::SET_COOKIE, cookie.to_string())]
}

fn base_cookie(value: String, secure: bool) -> tower_sessions::cookie::CookieBuilder<'static> {
    Cookie::build((AUTH_COOKIE, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
}

/// Issue a fresh token for `user` and wrap it in the session cookie.
pub fn issue_session(state: &AppState, user: &User) -> Result<[(HeaderName, String); 1], ApiError> {
    let token = state
        .tokens()
        .issue(user.id, &user.username, &user.email, user.role)
        .map_err(|e| ApiError::internal(format!("Error generating token: {e}")))?;
    Ok(session_cookie(state, token))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<ApiResponse<UserPayload>, ApiError> {
    let config = state.config();

    let username = validate_username(&payload.username)?;
    let email = validate_email(&payload.email)?;
    validate_password(&payload.password, config.security.min_password_length)?;
    let pfp = payload.pfp.as_deref().map(validate_pfp).transpose()?;

    let store = state.store();
    if store.get_user_by_username(&username).await?.is_some()
        || store.get_user_by_email(&email).await?.is_some()
    {
        return Err(ApiError::conflict(messages::ACCOUNT_TAKEN));
    }

    let password_hash = hash_password(&payload.password, &config.security).await?;

    let user = store
        .create_user(NewUser {
            username,
            email,
            password_hash,
            role: Role::Author,
            pfp,
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict(messages::ACCOUNT_TAKEN)
            } else {
                ApiError::from(e)
            }
        })?;

    Ok(ApiResponse::created(
        "User signed up successfully",
        UserPayload {
            user: UserDto::from(user),
        },
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identifier = payload.identifier.trim();
    if identifier.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Identifier and password are required"));
    }

    let Some((user, password_hash)) = state.store().get_user_credentials(identifier).await?
    else {
        return Err(ApiError::unauthorized(messages::INVALID_CREDENTIALS));
    };

    if !verify_password(&payload.password, &password_hash).await? {
        return Err(ApiError::unauthorized(messages::INVALID_CREDENTIALS));
    }

    let cookie = issue_session(&state, &user)?;

    info!(user_id = user.id, "User logged in");

    Ok((
        cookie,
        ApiResponse::success(
            "Login successful",
            UserPayload {
                user: UserDto::from(user),
            },
        ),
    ))
}

/// POST /api/user/logout
pub async fn logout(State(state): State<Arc<AppState>>, user: AuthUser) -> impl IntoResponse {
    debug!(user_id = user.id, "User logged out");
    (cleared_cookie(&state), ApiResponse::message("Logged out successfully"))
}
