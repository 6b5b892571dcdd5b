use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::entities::follows;

/// Ids on either side of a user's follow edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowLists {
    pub followers: Vec<i32>,
    pub following: Vec<i32>,
}

pub struct FollowRepository {
    conn: DatabaseConnection,
}

impl FollowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns `false` when the edge already existed.
    pub async fn follow(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        insert_edge(&self.conn, follower_id, followed_id).await
    }

    pub async fn unfollow(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        delete_edge(&self.conn, follower_id, followed_id).await
    }

    pub async fn is_following(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        let edge = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::FollowedId.eq(followed_id))
            .one(&self.conn)
            .await
            .context("Failed to query follow")?;

        Ok(edge.is_some())
    }

    /// Flip the edge and return whether `follower_id` now follows `followed_id`.
    pub async fn toggle(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let following = if delete_edge(&txn, follower_id, followed_id).await? {
            false
        } else {
            insert_edge(&txn, follower_id, followed_id).await?;
            true
        };

        txn.commit().await?;

        debug!(follower_id, followed_id, following, "Follow toggled");
        Ok(following)
    }

    /// Batch-load follower and following ids for the given users.
    pub async fn lists_for(&self, user_ids: &[i32]) -> Result<HashMap<i32, FollowLists>> {
        let mut lists: HashMap<i32, FollowLists> = user_ids
            .iter()
            .map(|id| (*id, FollowLists::default()))
            .collect();

        if user_ids.is_empty() {
            return Ok(lists);
        }

        let edges = follows::Entity::find()
            .filter(
                Condition::any()
                    .add(follows::Column::FollowerId.is_in(user_ids.iter().copied()))
                    .add(follows::Column::FollowedId.is_in(user_ids.iter().copied())),
            )
            .order_by_asc(follows::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to load follow edges")?;

        for edge in edges {
            if let Some(entry) = lists.get_mut(&edge.follower_id) {
                entry.following.push(edge.followed_id);
            }
            if let Some(entry) = lists.get_mut(&edge.followed_id) {
                entry.followers.push(edge.follower_id);
            }
        }

        Ok(lists)
    }
}

async fn insert_edge<C: ConnectionTrait>(
    conn: &C,
    follower_id: i32,
    followed_id: i32,
) -> Result<bool> {
    let active = follows::ActiveModel {
        follower_id: Set(follower_id),
        followed_id: Set(followed_id),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };

    let inserted = follows::Entity::insert(active)
        .on_conflict(
            OnConflict::columns([follows::Column::FollowerId, follows::Column::FollowedId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .context("Failed to insert follow")?;

    Ok(inserted > 0)
}

async fn delete_edge<C: ConnectionTrait>(
    conn: &C,
    follower_id: i32,
    followed_id: i32,
) -> Result<bool> {
    let result = follows::Entity::delete_many()
        .filter(follows::Column::FollowerId.eq(follower_id))
        .filter(follows::Column::FollowedId.eq(followed_id))
        .exec(conn)
        .await
        .context("Failed to delete follow")?;

    Ok(result.rows_affected > 0)
}
