use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::info;

use crate::entities::blogs;

pub use crate::entities::blogs::Model as Blog;

#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Listing filter. Pagination applies only when `page` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogQuery {
    pub author_id: Option<i32>,
    pub page: Option<u64>,
    pub per_page: u64,
}

pub struct BlogRepository {
    conn: DatabaseConnection,
}

impl BlogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        user_id: i32,
        author: &str,
        title: &str,
        content: &str,
    ) -> Result<Blog> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = blogs::ActiveModel {
            title: Set(title.to_string()),
            content: Set(content.to_string()),
            user_id: Set(user_id),
            author: Set(author.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let blog = active
            .insert(&self.conn)
            .await
            .context("Failed to insert blog")?;

        info!(blog_id = blog.id, user_id, "Blog created");
        Ok(blog)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Blog>> {
        blogs::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query blog")
    }

    /// Newest first.
    pub async fn list(&self, query: BlogQuery) -> Result<Vec<Blog>> {
        let mut select = blogs::Entity::find()
            .order_by_desc(blogs::Column::CreatedAt)
            .order_by_desc(blogs::Column::Id);

        if let Some(author_id) = query.author_id {
            select = select.filter(blogs::Column::UserId.eq(author_id));
        }

        if let Some(page) = query.page {
            let per_page = query.per_page.max(1);
            // Past any addressable row: nothing to return.
            let Some(offset) = page.saturating_sub(1).checked_mul(per_page) else {
                return Ok(Vec::new());
            };
            select = select.offset(offset).limit(per_page);
        }

        select.all(&self.conn).await.context("Failed to list blogs")
    }

    /// Update title/content. With `owner` set the row must also belong to
    /// that user; `None` is returned when nothing matched.
    pub async fn update(
        &self,
        id: i32,
        owner: Option<i32>,
        patch: BlogPatch,
    ) -> Result<Option<Blog>> {
        let mut update = blogs::Entity::update_many()
            .col_expr(
                blogs::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(blogs::Column::Id.eq(id));

        if let Some(title) = patch.title {
            update = update.col_expr(blogs::Column::Title, Expr::value(title));
        }
        if let Some(content) = patch.content {
            update = update.col_expr(blogs::Column::Content, Expr::value(content));
        }
        if let Some(owner) = owner {
            update = update.filter(blogs::Column::UserId.eq(owner));
        }

        let result = update
            .exec(&self.conn)
            .await
            .context("Failed to update blog")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get(id).await
    }

    /// Hard delete; comments, likes and views cascade.
    pub async fn delete(&self, id: i32, owner: Option<i32>) -> Result<bool> {
        let mut delete = blogs::Entity::delete_many().filter(blogs::Column::Id.eq(id));
        if let Some(owner) = owner {
            delete = delete.filter(blogs::Column::UserId.eq(owner));
        }

        let result = delete
            .exec(&self.conn)
            .await
            .context("Failed to delete blog")?;

        if result.rows_affected > 0 {
            info!(blog_id = id, "Blog deleted");
        }
        Ok(result.rows_affected > 0)
    }
}
