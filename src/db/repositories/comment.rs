use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::comments;

pub use crate::entities::comments::Model as Comment;

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        blog_id: i32,
        user_id: i32,
        author: &str,
        content: &str,
    ) -> Result<Comment> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = comments::ActiveModel {
            content: Set(content.to_string()),
            user_id: Set(user_id),
            author: Set(author.to_string()),
            blog_id: Set(blog_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let comment = active
            .insert(&self.conn)
            .await
            .context("Failed to insert comment")?;

        info!(comment_id = comment.id, blog_id, user_id, "Comment created");
        Ok(comment)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Comment>> {
        comments::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query comment")
    }

    /// Oldest first, the order a thread is read in.
    pub async fn list_for_blog(&self, blog_id: i32) -> Result<Vec<Comment>> {
        comments::Entity::find()
            .filter(comments::Column::BlogId.eq(blog_id))
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list comments for blog")
    }

    pub async fn list(&self) -> Result<Vec<Comment>> {
        comments::Entity::find()
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list comments")
    }

    /// Replace the content. `owner` restricts the match to that user's row.
    pub async fn update(
        &self,
        id: i32,
        owner: Option<i32>,
        content: &str,
    ) -> Result<Option<Comment>> {
        let mut update = comments::Entity::update_many()
            .col_expr(comments::Column::Content, Expr::value(content))
            .col_expr(
                comments::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(comments::Column::Id.eq(id));

        if let Some(owner) = owner {
            update = update.filter(comments::Column::UserId.eq(owner));
        }

        let result = update
            .exec(&self.conn)
            .await
            .context("Failed to update comment")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: i32, owner: Option<i32>) -> Result<bool> {
        let mut delete = comments::Entity::delete_many().filter(comments::Column::Id.eq(id));
        if let Some(owner) = owner {
            delete = delete.filter(comments::Column::UserId.eq(owner));
        }

        let result = delete
            .exec(&self.conn)
            .await
            .context("Failed to delete comment")?;

        if result.rows_affected > 0 {
            info!(comment_id = id, "Comment deleted");
        }
        Ok(result.rows_affected > 0)
    }
}
