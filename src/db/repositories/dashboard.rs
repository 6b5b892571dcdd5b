use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::Serialize;

use crate::entities::{blogs, comments, users};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub total_users: u64,
    pub total_blogs: u64,
    pub total_comments: u64,
}

pub struct DashboardRepository {
    conn: DatabaseConnection,
}

impl DashboardRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn counts(&self) -> Result<DashboardCounts> {
        let total_users = users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")?;
        let total_blogs = blogs::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count blogs")?;
        let total_comments = comments::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count comments")?;

        Ok(DashboardCounts {
            total_users,
            total_blogs,
            total_comments,
        })
    }
}
