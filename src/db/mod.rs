use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::models::Role;

pub mod migrator;
pub mod repositories;

pub use repositories::blog::{Blog, BlogPatch, BlogQuery};
pub use repositories::comment::Comment;
pub use repositories::dashboard::DashboardCounts;
pub use repositories::follow::FollowLists;
pub use repositories::like::Like;
pub use repositories::user::{NewUser, User, UserPatch};
pub use repositories::view::View;

/// A data-access call exceeded `database.query_timeout_secs`.
#[derive(Debug, Error)]
#[error("Database query timed out after {0:?}")]
pub struct QueryTimeout(pub Duration);

/// Whether `err` was caused by a unique-index violation.
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<sea_orm::DbErr>())
        .any(|db_err| {
            matches!(
                db_err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            )
        })
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    query_timeout: Duration,
}

impl Store {
    /// Open the pool described by `config` and apply pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let store = Self::open(config).await?;
        migrator::Migrator::up(&store.conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            config.min_connections, config.max_connections
        );

        Ok(store)
    }

    /// Open the pool without touching the schema.
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let db_url = config.connection_url()?;

        if let Some(path) = sqlite_file_path(&db_url) {
            if let Some(parent) = Path::new(path).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path).exists() {
                std::fs::File::create(path)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .sqlx_logging(false);

        if let Some(schema) = config.schema.as_deref().filter(|_| config.is_postgres()) {
            opt.set_schema_search_path(schema);
        }

        let conn = Database::connect(opt).await?;

        Ok(Self {
            conn,
            query_timeout: Duration::from_secs(config.query_timeout_secs),
        })
    }

    pub async fn migrate(&self) -> Result<()> {
        migrator::Migrator::up(&self.conn, None).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        self.bounded(async {
            let backend = self.conn.get_database_backend();
            self.conn
                .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
                .await?;
            Ok::<(), anyhow::Error>(())
        })
        .await
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.query_timeout, fut)
            .await
            .map_err(|_| QueryTimeout(self.query_timeout))?
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn blog_repo(&self) -> repositories::blog::BlogRepository {
        repositories::blog::BlogRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    fn like_repo(&self) -> repositories::like::LikeRepository {
        repositories::like::LikeRepository::new(self.conn.clone())
    }

    fn follow_repo(&self) -> repositories::follow::FollowRepository {
        repositories::follow::FollowRepository::new(self.conn.clone())
    }

    fn view_repo(&self) -> repositories::view::ViewRepository {
        repositories::view::ViewRepository::new(self.conn.clone())
    }

    fn dashboard_repo(&self) -> repositories::dashboard::DashboardRepository {
        repositories::dashboard::DashboardRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        self.bounded(self.user_repo().create(user)).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.bounded(self.user_repo().get_by_id(id)).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.bounded(self.user_repo().get_by_username(username)).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.bounded(self.user_repo().get_by_email(email)).await
    }

    pub async fn get_user_credentials(&self, identifier: &str) -> Result<Option<(User, String)>> {
        self.bounded(self.user_repo().get_credentials(identifier)).await
    }

    pub async fn get_user_password_hash(&self, id: i32) -> Result<Option<String>> {
        self.bounded(self.user_repo().get_password_hash(id)).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.bounded(self.user_repo().list()).await
    }

    pub async fn update_user(&self, id: i32, patch: UserPatch) -> Result<Option<User>> {
        self.bounded(self.user_repo().update(id, patch)).await
    }

    pub async fn set_user_role(&self, id: i32, role: Role) -> Result<bool> {
        self.bounded(self.user_repo().set_role(id, role)).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.bounded(self.user_repo().delete(id)).await
    }

    // ========== Blogs ==========

    pub async fn create_blog(
        &self,
        user_id: i32,
        author: &str,
        title: &str,
        content: &str,
    ) -> Result<Blog> {
        self.bounded(self.blog_repo().create(user_id, author, title, content)).await
    }

    pub async fn get_blog(&self, id: i32) -> Result<Option<Blog>> {
        self.bounded(self.blog_repo().get(id)).await
    }

    pub async fn list_blogs(&self, query: BlogQuery) -> Result<Vec<Blog>> {
        self.bounded(self.blog_repo().list(query)).await
    }

    /// `owner: None` is the unrestricted (admin) variant.
    pub async fn update_blog(
        &self,
        id: i32,
        owner: Option<i32>,
        patch: BlogPatch,
    ) -> Result<Option<Blog>> {
        self.bounded(self.blog_repo().update(id, owner, patch)).await
    }

    pub async fn delete_blog(&self, id: i32, owner: Option<i32>) -> Result<bool> {
        self.bounded(self.blog_repo().delete(id, owner)).await
    }

    // ========== Comments ==========

    pub async fn create_comment(
        &self,
        blog_id: i32,
        user_id: i32,
        author: &str,
        content: &str,
    ) -> Result<Comment> {
        self.bounded(self.comment_repo().create(blog_id, user_id, author, content)).await
    }

    pub async fn get_comment(&self, id: i32) -> Result<Option<Comment>> {
        self.bounded(self.comment_repo().get(id)).await
    }

    pub async fn list_comments_for_blog(&self, blog_id: i32) -> Result<Vec<Comment>> {
        self.bounded(self.comment_repo().list_for_blog(blog_id)).await
    }

    pub async fn list_comments(&self) -> Result<Vec<Comment>> {
        self.bounded(self.comment_repo().list()).await
    }

    pub async fn update_comment(
        &self,
        id: i32,
        owner: Option<i32>,
        content: &str,
    ) -> Result<Option<Comment>> {
        self.bounded(self.comment_repo().update(id, owner, content)).await
    }

    pub async fn delete_comment(&self, id: i32, owner: Option<i32>) -> Result<bool> {
        self.bounded(self.comment_repo().delete(id, owner)).await
    }

    // ========== Likes ==========

    pub async fn like_blog(&self, user_id: i32, blog_id: i32) -> Result<bool> {
        self.bounded(self.like_repo().like(user_id, blog_id)).await
    }

    pub async fn unlike_blog(&self, user_id: i32, blog_id: i32) -> Result<bool> {
        self.bounded(self.like_repo().unlike(user_id, blog_id)).await
    }

    pub async fn get_like(&self, user_id: i32, blog_id: i32) -> Result<Option<Like>> {
        self.bounded(self.like_repo().get(user_id, blog_id)).await
    }

    pub async fn like_count(&self, blog_id: i32) -> Result<u64> {
        self.bounded(self.like_repo().count_for_blog(blog_id)).await
    }

    // ========== Follows ==========

    pub async fn follow(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        self.bounded(self.follow_repo().follow(follower_id, followed_id)).await
    }

    pub async fn unfollow(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        self.bounded(self.follow_repo().unfollow(follower_id, followed_id)).await
    }

    pub async fn is_following(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        self.bounded(self.follow_repo().is_following(follower_id, followed_id)).await
    }

    pub async fn toggle_follow(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        self.bounded(self.follow_repo().toggle(follower_id, followed_id)).await
    }

    pub async fn follow_lists(&self, user_ids: &[i32]) -> Result<HashMap<i32, FollowLists>> {
        self.bounded(self.follow_repo().lists_for(user_ids)).await
    }

    // ========== Views ==========

    pub async fn record_view(&self, user_id: i32, blog_id: i32) -> Result<(View, bool)> {
        self.bounded(self.view_repo().record(user_id, blog_id)).await
    }

    pub async fn view_count(&self, blog_id: i32) -> Result<u64> {
        self.bounded(self.view_repo().count_for_blog(blog_id)).await
    }

    // ========== Dashboard ==========

    pub async fn dashboard_counts(&self) -> Result<DashboardCounts> {
        self.bounded(self.dashboard_repo().counts()).await
    }
}

/// Filesystem path of a file-backed SQLite URL, `None` for in-memory or
/// non-SQLite URLs.
fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path.contains(":memory:") || url.contains("mode=memory") {
        return None;
    }
    Some(path)
}
