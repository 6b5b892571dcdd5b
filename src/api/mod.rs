use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::security::TokenIssuer;
use crate::state::SharedState;

mod admin;
mod auth;
mod blogs;
mod comments;
mod error;
mod extract;
mod likes;
mod observability;
mod system;
mod types;
mod users;
pub(crate) mod validation;

pub use error::ApiError;
pub use extract::{AppJson, AuthUser};
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenIssuer {
        &self.shared.tokens
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .nest("/user", user_router(state.clone()))
        .nest("/blog", blog_router(state.clone()))
        .nest("/comment", comment_router(state.clone()))
        .nest("/admin", admin_router(state.clone()));

    let origins: Vec<HeaderValue> = cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
    let cors_layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(system::hello))
        .route("/health", get(system::health))
        .nest("/api", api_router)
        .fallback(not_found)
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Resource not found")
}

fn user_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(users::get_current_user)
                .put(users::update_current_user)
                .delete(users::delete_current_user),
        )
        .route("/logout", post(auth::logout))
        .route("/all", get(users::list_users))
        .route("/{user_id}", get(users::get_user))
        .route("/follow/{user_id}", post(users::follow_user))
        .route("/follow/{user_id}/toggle", post(users::toggle_follow))
        .route("/unfollow/{user_id}", delete(users::unfollow_user))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

fn blog_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(blogs::list_blogs).post(blogs::create_blog))
        .route("/all", get(blogs::list_blogs))
        .route(
            "/b/{blog_id}",
            get(blogs::get_blog)
                .put(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
        .route("/{blog_id}/view", post(blogs::record_view))
        .route("/like", post(likes::like_blog))
        .route("/unlike", delete(likes::unlike_blog))
        .route(
            "/{blog_id}/comments",
            get(comments::list_blog_comments).post(comments::create_comment),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

fn comment_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/{comment_id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

/// Layers run bottom-up: authentication first, then the role check.
fn admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::list_users))
        .route("/user", put(admin::update_user))
        .route(
            "/user/{user_id}",
            get(admin::get_user).delete(admin::delete_user),
        )
        .route("/blogs", get(admin::list_blogs))
        .route("/blog", put(admin::update_blog))
        .route(
            "/blog/{blog_id}",
            get(admin::get_blog).delete(admin::delete_blog),
        )
        .route("/comments", get(admin::list_comments))
        .route("/comment", put(admin::update_comment))
        .route("/comment/{comment_id}", delete(admin::delete_comment))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::admin_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
