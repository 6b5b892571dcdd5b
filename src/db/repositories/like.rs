use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::entities::likes;

pub use crate::entities::likes::Model as Like;

pub struct LikeRepository {
    conn: DatabaseConnection,
}

impl LikeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns `false` when the pair already existed.
    pub async fn like(&self, user_id: i32, blog_id: i32) -> Result<bool> {
        let active = likes::ActiveModel {
            user_id: Set(user_id),
            blog_id: Set(blog_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let inserted = likes::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([likes::Column::UserId, likes::Column::BlogId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert like")?;

        Ok(inserted > 0)
    }

    pub async fn unlike(&self, user_id: i32, blog_id: i32) -> Result<bool> {
        let result = likes::Entity::delete_many()
            .filter(likes::Column::UserId.eq(user_id))
            .filter(likes::Column::BlogId.eq(blog_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete like")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get(&self, user_id: i32, blog_id: i32) -> Result<Option<Like>> {
        likes::Entity::find()
            .filter(likes::Column::UserId.eq(user_id))
            .filter(likes::Column::BlogId.eq(blog_id))
            .one(&self.conn)
            .await
            .context("Failed to query like")
    }

    pub async fn count_for_blog(&self, blog_id: i32) -> Result<u64> {
        likes::Entity::find()
            .filter(likes::Column::BlogId.eq(blog_id))
            .count(&self.conn)
            .await
            .context("Failed to count likes")
    }
}
