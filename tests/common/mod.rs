#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use bloghub::api::{self, AppState};
use bloghub::config::Config;
use bloghub::models::Role;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "correct-horse-battery";

/// Router over a fresh SQLite file; the file is removed on drop.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub fn test_config(db_path: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.database.url = Some(format!("sqlite://{}?mode=rwc", db_path.display()));
    config.database.max_connections = 4;
    config.auth.jwt_secret = Some("test-secret-test-secret-test-secret!".to_string());
    config.server.secure_cookies = false;
    config.security.argon2_memory_cost_kib = 8;
    config.security.argon2_time_cost = 1;
    config.observability.metrics_enabled = false;
    config
}

pub async fn spawn_app() -> TestApp {
    let db_path = std::env::temp_dir().join(format!("bloghub-test-{}.db", Uuid::new_v4()));
    let config = test_config(&db_path);

    let state = api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    TestApp {
        router: api::router(state.clone()),
        state,
        db_path,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    /// Send a request and decode the JSON envelope.
    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.request(method, uri, cookie, body).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn register(&self, username: &str, email: &str) -> (StatusCode, Value) {
        self.call(
            "POST",
            "/api/register",
            None,
            Some(json!({ "username": username, "email": email, "password": PASSWORD })),
        )
        .await
    }

    /// Log in and return the `name=value` pair for the session cookie.
    pub async fn login(&self, identifier: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/login",
                None,
                Some(json!({ "identifier": identifier, "password": PASSWORD })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response).expect("login sets the session cookie")
    }

    /// Register, log in, and return `(user id, cookie)`.
    pub async fn signup(&self, username: &str) -> (i32, String) {
        let (status, body) = self
            .register(username, &format!("{username}@example.com"))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let id = body["data"]["user"]["id"].as_i64().unwrap() as i32;
        (id, self.login(username).await)
    }

    pub async fn signup_admin(&self, username: &str) -> (i32, String) {
        let (id, cookie) = self.signup(username).await;
        assert!(self.state.store().set_user_role(id, Role::Admin).await.unwrap());
        (id, cookie)
    }

    pub async fn create_blog(&self, cookie: &str, title: &str) -> i32 {
        let (status, body) = self
            .call(
                "POST",
                "/api/blog",
                Some(cookie),
                Some(json!({ "title": title, "content": "Some words." })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["blog"]["id"].as_i64().unwrap() as i32
    }

    pub async fn create_comment(&self, cookie: &str, blog_id: i32, content: &str) -> i32 {
        let (status, body) = self
            .call(
                "POST",
                &format!("/api/blog/{blog_id}/comments"),
                Some(cookie),
                Some(json!({ "content": content })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["comment"]["id"].as_i64().unwrap() as i32
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("auth_token="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
