mod common;

use axum::http::StatusCode;
use bloghub::db::BlogQuery;
use bloghub::models::Role;
use bloghub::security::TokenIssuer;
use common::{PASSWORD, session_cookie, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_register_rejects_taken_email() {
    let app = spawn_app().await;

    let (status, body) = app.register("ada", "ada@example.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["role"], "author");

    let (status, body) = app.register("grace", "ADA@example.com").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username/Email already taken");

    let (status, _) = app.register("ada", "other@example.com").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.register("grace", "grace@example.com").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_validates_input() {
    let app = spawn_app().await;

    let (status, body) = app
        .call(
            "POST",
            "/api/register",
            None,
            Some(json!({ "username": "ada", "email": "not-an-email", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 400);

    let (status, _) = app
        .call(
            "POST",
            "/api/register",
            None,
            Some(json!({ "username": "ada", "email": "ada@example.com", "password": "short" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .call(
            "POST",
            "/api/register",
            None,
            Some(json!({
                "username": "ada",
                "email": "ada@example.com",
                "password": PASSWORD,
                "pfp": "http://",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Profile image must be an http(s) URL");
}

#[tokio::test]
async fn test_login_sets_cookie_and_hides_hash() {
    let app = spawn_app().await;
    app.register("ada", "ada@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let raw_cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(raw_cookie.contains("HttpOnly"));
    assert!(raw_cookie.contains("SameSite=Lax"));
    assert!(raw_cookie.contains("Path=/"));
    assert!(session_cookie(&response).is_some());

    let body = common::body_json(response).await;
    let text = body.to_string();
    assert!(!text.contains("password"));
    assert!(!text.contains("$argon2"));
    assert_eq!(body["data"]["user"]["username"], "ada");

    // Username works as the identifier too
    let cookie = app.login("ada").await;
    let (status, body) = app.call("GET", "/api/user", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "ada@example.com");
    assert!(!body.to_string().contains("$argon2"));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;
    app.register("ada", "ada@example.com").await;

    let (status, body) = app
        .call(
            "POST",
            "/api/login",
            None,
            Some(json!({ "identifier": "ada@example.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = app
        .call(
            "POST",
            "/api/login",
            None,
            Some(json!({ "identifier": "nobody@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_session_tokens_are_checked() {
    let app = spawn_app().await;
    let (id, cookie) = app.signup("ada").await;

    let (status, _) = app.call("GET", "/api/user", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut tampered = cookie.clone();
    tampered.push('x');
    let (status, _) = app.call("GET", "/api/user", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = TokenIssuer::new(
        "another-secret-another-secret-another",
        chrono::Duration::hours(1),
    )
    .unwrap()
    .issue(id, "ada", "ada@example.com", Role::Admin)
    .unwrap();
    let (status, _) = app
        .call(
            "GET",
            "/api/user",
            Some(&format!("auth_token={foreign}")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = TokenIssuer::new(
        app.state.config().jwt_secret(),
        chrono::Duration::seconds(-60),
    )
    .unwrap()
    .issue(id, "ada", "ada@example.com", Role::Author)
    .unwrap();
    let (status, _) = app
        .call(
            "GET",
            "/api/user",
            Some(&format!("auth_token={expired}")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = spawn_app().await;
    let (_, cookie) = app.signup("ada").await;

    let response = app
        .request("POST", "/api/user/logout", Some(&cookie), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(session_cookie(&response).as_deref(), Some("auth_token="));
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let app = spawn_app().await;
    let (_, cookie) = app.signup("ada").await;

    let (status, _) = app.call("DELETE", "/api/user", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.call("GET", "/api/user", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_current_user() {
    let app = spawn_app().await;
    let (_, cookie) = app.signup("ada").await;
    let (grace_id, grace_cookie) = app.signup("grace").await;
    let blog_id = app.create_blog(&cookie, "First").await;

    let (status, _) = app
        .call(
            "PUT",
            "/api/user",
            Some(&cookie),
            Some(json!({ "username": "grace" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .call(
            "PUT",
            "/api/user",
            Some(&cookie),
            Some(json!({ "username": "lovelace", "pfp": "https://example.com/a.png" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["user"]["username"], "lovelace");

    let (_, body) = app
        .call(
            "GET",
            &format!("/api/blog/b/{blog_id}"),
            Some(&grace_cookie),
            None,
        )
        .await;
    assert_eq!(body["data"]["blog"]["author"], "lovelace");

    // Password change needs the current password
    let (status, _) = app
        .call(
            "PUT",
            "/api/user",
            Some(&cookie),
            Some(json!({ "password": "brand-new-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call("GET", &format!("/api/user/{grace_id}"), Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_like_then_unlike() {
    let app = spawn_app().await;
    let (_, cookie) = app.signup("ada").await;
    let blog_id = app.create_blog(&cookie, "Likeable").await;

    let like = json!({ "blog_id": blog_id });

    let (status, body) = app
        .call("POST", "/api/blog/like", Some(&cookie), Some(like.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["like"]["blog_id"], blog_id);

    let (status, body) = app
        .call("POST", "/api/blog/like", Some(&cookie), Some(like.clone()))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "You have already liked this blog");

    let (_, body) = app
        .call("GET", &format!("/api/blog/b/{blog_id}"), Some(&cookie), None)
        .await;
    assert_eq!(body["data"]["like_count"], 1);

    let (status, _) = app
        .call("DELETE", "/api/blog/unlike", Some(&cookie), Some(like.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call("DELETE", "/api/blog/unlike", Some(&cookie), Some(like))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "You have not liked this blog");

    let (status, _) = app
        .call(
            "POST",
            "/api/blog/like",
            Some(&cookie),
            Some(json!({ "blog_id": 9999 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_mutations_are_owner_scoped() {
    let app = spawn_app().await;
    let (_, owner) = app.signup("ada").await;
    let (_, other) = app.signup("grace").await;
    let blog_id = app.create_blog(&owner, "Discuss").await;
    let comment_id = app.create_comment(&owner, blog_id, "original").await;
    let uri = format!("/api/comment/{comment_id}");

    let (status, _) = app
        .call("PUT", &uri, Some(&other), Some(json!({ "content": "hijacked" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.call("DELETE", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.call("GET", &uri, Some(&other), None).await;
    assert_eq!(body["data"]["comment"]["content"], "original");

    let (status, body) = app
        .call("PUT", &uri, Some(&owner), Some(json!({ "content": "edited" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["comment"]["content"], "edited");

    let stored = app
        .state
        .store()
        .get_comment(comment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.content, "edited");

    let (status, _) = app.call("DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.call("GET", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blog_comments_are_listed_oldest_first() {
    let app = spawn_app().await;
    let (_, cookie) = app.signup("ada").await;
    let blog_id = app.create_blog(&cookie, "Thread").await;
    app.create_comment(&cookie, blog_id, "first").await;
    app.create_comment(&cookie, blog_id, "second").await;

    let (status, body) = app
        .call(
            "GET",
            &format!("/api/blog/{blog_id}/comments"),
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let comments = body["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "first");
    assert_eq!(comments[1]["author"], "ada");
}

#[tokio::test]
async fn test_blog_mutations_are_owner_scoped() {
    let app = spawn_app().await;
    let (_, owner) = app.signup("ada").await;
    let (_, other) = app.signup("grace").await;
    let blog_id = app.create_blog(&owner, "Mine").await;
    let uri = format!("/api/blog/b/{blog_id}");

    let (status, body) = app
        .call("PUT", &uri, Some(&other), Some(json!({ "title": "Theirs" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Blog not found or not owned by user");

    let (status, _) = app.call("DELETE", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .call("PUT", &uri, Some(&owner), Some(json!({ "title": "Still mine" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["blog"]["title"], "Still mine");
    assert_eq!(body["data"]["blog"]["content"], "Some words.");

    let (status, _) = app
        .call("PUT", &uri, Some(&owner), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blog_listing_filters_and_pages() {
    let app = spawn_app().await;
    let (ada_id, ada) = app.signup("ada").await;
    let (_, grace) = app.signup("grace").await;
    app.create_blog(&ada, "One").await;
    app.create_blog(&ada, "Two").await;
    app.create_blog(&grace, "Three").await;

    let (status, body) = app.call("GET", "/api/blog/all", Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["blogs"].as_array().unwrap().len(), 3);

    let (_, body) = app
        .call(
            "GET",
            &format!("/api/blog?author_id={ada_id}"),
            Some(&ada),
            None,
        )
        .await;
    let blogs = body["data"]["blogs"].as_array().unwrap();
    assert_eq!(blogs.len(), 2);
    assert!(blogs.iter().all(|b| b["user_id"] == ada_id));

    let (_, body) = app
        .call("GET", "/api/blog?page=2&per_page=2", Some(&ada), None)
        .await;
    assert_eq!(body["data"]["blogs"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .call("GET", "/api/blog?per_page=1000", Some(&ada), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blog_listing_rejects_out_of_range_pages() {
    let app = spawn_app().await;
    let (_, cookie) = app.signup("ada").await;
    app.create_blog(&cookie, "Only").await;

    let (status, body) = app
        .call(
            "GET",
            "/api/blog?page=18446744073709551615&per_page=100",
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .call("GET", "/api/blog?page=1000000&per_page=100", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["blogs"], json!([]));

    // The server is still answering
    let (status, _) = app.call("GET", "/api/blog", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    // Offsets past u64 yield an empty page at the store level too
    let blogs = app
        .state
        .store()
        .list_blogs(BlogQuery {
            author_id: None,
            page: Some(u64::MAX),
            per_page: 100,
        })
        .await
        .unwrap();
    assert!(blogs.is_empty());
}

#[tokio::test]
async fn test_view_is_recorded_once() {
    let app = spawn_app().await;
    let (_, cookie) = app.signup("ada").await;
    let blog_id = app.create_blog(&cookie, "Seen").await;
    let uri = format!("/api/blog/{blog_id}/view");

    let (status, body) = app.call("POST", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], true);
    let view_id = body["data"]["view"]["id"].clone();

    let (status, body) = app.call("POST", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], false);
    assert_eq!(body["data"]["view"]["id"], view_id);

    assert_eq!(app.state.store().view_count(blog_id).await.unwrap(), 1);

    let (status, _) = app
        .call("POST", "/api/blog/4242/view", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_follow_lifecycle() {
    let app = spawn_app().await;
    let (ada_id, ada) = app.signup("ada").await;
    let (grace_id, grace) = app.signup("grace").await;
    let store = app.state.store();

    let (status, _) = app
        .call("POST", &format!("/api/user/follow/{ada_id}"), Some(&ada), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call("POST", "/api/user/follow/777", Some(&ada), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let follow = format!("/api/user/follow/{grace_id}");
    let (status, _) = app.call("POST", &follow, Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.call("POST", &follow, Some(&ada), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(store.is_following(ada_id, grace_id).await.unwrap());

    let (_, body) = app
        .call("GET", &format!("/api/user/{grace_id}"), Some(&grace), None)
        .await;
    assert_eq!(body["data"]["user"]["followers"], json!([ada_id]));
    assert_eq!(body["data"]["user"]["following"], json!([]));
    assert_eq!(body["data"]["is_following"], false);

    let (_, body) = app
        .call("GET", &format!("/api/user/{grace_id}"), Some(&ada), None)
        .await;
    assert_eq!(body["data"]["is_following"], true);

    let (_, body) = app
        .call("GET", &format!("/api/user/{ada_id}"), Some(&grace), None)
        .await;
    assert_eq!(body["data"]["is_following"], false);

    let unfollow = format!("/api/user/unfollow/{grace_id}");
    let (status, _) = app.call("DELETE", &unfollow, Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.call("DELETE", &unfollow, Some(&ada), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let toggle = format!("/api/user/follow/{grace_id}/toggle");
    let (_, body) = app.call("POST", &toggle, Some(&ada), None).await;
    assert_eq!(body["data"]["following"], true);
    let (_, body) = app.call("POST", &toggle, Some(&ada), None).await;
    assert_eq!(body["data"]["following"], false);
    assert!(!store.is_following(ada_id, grace_id).await.unwrap());
}

#[tokio::test]
async fn test_deleting_user_cascades() {
    let app = spawn_app().await;
    let (ada_id, ada) = app.signup("ada").await;
    let (grace_id, grace) = app.signup("grace").await;
    let store = app.state.store();

    let ada_blog = app.create_blog(&ada, "Ada's").await;
    let grace_blog = app.create_blog(&grace, "Grace's").await;
    let ada_comment = app.create_comment(&ada, grace_blog, "hi").await;
    let grace_comment = app.create_comment(&grace, ada_blog, "hello").await;

    app.call(
        "POST",
        "/api/blog/like",
        Some(&ada),
        Some(json!({ "blog_id": grace_blog })),
    )
    .await;
    app.call("POST", &format!("/api/blog/{grace_blog}/view"), Some(&ada), None)
        .await;
    app.call("POST", &format!("/api/user/follow/{grace_id}"), Some(&ada), None)
        .await;
    app.call("POST", &format!("/api/user/follow/{ada_id}"), Some(&grace), None)
        .await;

    let (status, _) = app.call("DELETE", "/api/user", Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);

    assert!(store.get_user(ada_id).await.unwrap().is_none());
    assert!(store.get_blog(ada_blog).await.unwrap().is_none());
    assert!(store.get_comment(ada_comment).await.unwrap().is_none());
    assert!(store.get_comment(grace_comment).await.unwrap().is_none());
    assert_eq!(store.like_count(grace_blog).await.unwrap(), 0);
    assert_eq!(store.view_count(grace_blog).await.unwrap(), 0);

    let lists = store.follow_lists(&[grace_id]).await.unwrap();
    let grace_follows = lists.get(&grace_id).cloned().unwrap_or_default();
    assert!(grace_follows.followers.is_empty());
    assert!(grace_follows.following.is_empty());

    assert!(store.get_blog(grace_blog).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleting_blog_cascades() {
    let app = spawn_app().await;
    let (_, ada) = app.signup("ada").await;
    let (_, grace) = app.signup("grace").await;
    let store = app.state.store();

    let blog_id = app.create_blog(&ada, "Short-lived").await;
    let comment_id = app.create_comment(&grace, blog_id, "nice").await;
    app.call(
        "POST",
        "/api/blog/like",
        Some(&grace),
        Some(json!({ "blog_id": blog_id })),
    )
    .await;
    app.call("POST", &format!("/api/blog/{blog_id}/view"), Some(&grace), None)
        .await;

    let (status, _) = app
        .call("DELETE", &format!("/api/blog/b/{blog_id}"), Some(&ada), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    assert!(store.get_comment(comment_id).await.unwrap().is_none());
    assert_eq!(store.like_count(blog_id).await.unwrap(), 0);
    assert_eq!(store.view_count(blog_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = spawn_app().await;
    let (_, author) = app.signup("ada").await;

    let (status, _) = app.call("GET", "/api/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .call("GET", "/api/admin/dashboard", Some(&author), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied, admin role required");

    let (_, admin) = app.signup_admin("root").await;
    let blog_id = app.create_blog(&author, "Counted").await;
    app.create_comment(&author, blog_id, "counted too").await;

    let (status, body) = app
        .call("GET", "/api/admin/dashboard", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["dashboard"],
        json!({ "total_users": 2, "total_blogs": 1, "total_comments": 1 })
    );
}

#[tokio::test]
async fn test_admin_manages_any_content() {
    let app = spawn_app().await;
    let (ada_id, ada) = app.signup("ada").await;
    let (_, admin) = app.signup_admin("root").await;
    let blog_id = app.create_blog(&ada, "Moderated").await;
    let comment_id = app.create_comment(&ada, blog_id, "rude").await;

    let (status, body) = app
        .call(
            "PUT",
            "/api/admin/comment",
            Some(&admin),
            Some(json!({ "id": comment_id, "content": "[removed]" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["comment"]["content"], "[removed]");

    let (status, body) = app
        .call(
            "PUT",
            "/api/admin/blog",
            Some(&admin),
            Some(json!({ "id": blog_id, "title": "Edited by admin" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["blog"]["title"], "Edited by admin");

    let (status, body) = app
        .call(
            "PUT",
            "/api/admin/user",
            Some(&admin),
            Some(json!({ "id": ada_id, "role": "admin" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "admin");

    // Role changes apply to live sessions
    let (status, _) = app
        .call("GET", "/api/admin/users", Some(&ada), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call("GET", "/api/admin/comments", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 1);

    let comment_path = format!("/api/admin/comment/{comment_id}");
    let (status, _) = app.call("DELETE", &comment_path, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.call("DELETE", &comment_path, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.state.store().get_comment(comment_id).await.unwrap().is_none());

    let (status, _) = app
        .call(
            "DELETE",
            &format!("/api/admin/blog/{blog_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .call(
            "GET",
            &format!("/api/admin/blog/{blog_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call(
            "DELETE",
            &format!("/api/admin/user/{ada_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.call("GET", "/api/admin/users", Some(&admin), None).await;
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 1);
}
