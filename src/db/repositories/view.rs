use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::entities::views;

pub use crate::entities::views::Model as View;

pub struct ViewRepository {
    conn: DatabaseConnection,
}

impl ViewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get-or-create the view row for the pair. The flag is `true` when
    /// this call inserted it.
    pub async fn record(&self, user_id: i32, blog_id: i32) -> Result<(View, bool)> {
        let active = views::ActiveModel {
            user_id: Set(user_id),
            blog_id: Set(blog_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let inserted = views::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([views::Column::UserId, views::Column::BlogId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert view")?;

        let view = views::Entity::find()
            .filter(views::Column::UserId.eq(user_id))
            .filter(views::Column::BlogId.eq(blog_id))
            .one(&self.conn)
            .await
            .context("Failed to query view")?
            .ok_or_else(|| anyhow::anyhow!("View row missing after insert"))?;

        Ok((view, inserted > 0))
    }

    pub async fn count_for_blog(&self, blog_id: i32) -> Result<u64> {
        views::Entity::find()
            .filter(views::Column::BlogId.eq(blog_id))
            .count(&self.conn)
            .await
            .context("Failed to count views")
    }
}
