use crate::entities::{follows, likes, prelude::*, views};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const IDX_LIKES_PAIR: &str = "idx_likes_user_blog_unique";
const IDX_VIEWS_PAIR: &str = "idx_views_user_blog_unique";
const IDX_FOLLOWS_PAIR: &str = "idx_follows_pair_unique";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(IDX_LIKES_PAIR)
                    .table(Likes)
                    .col(likes::Column::UserId)
                    .col(likes::Column::BlogId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VIEWS_PAIR)
                    .table(Views)
                    .col(views::Column::UserId)
                    .col(views::Column::BlogId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_FOLLOWS_PAIR)
                    .table(Follows)
                    .col(follows::Column::FollowerId)
                    .col(follows::Column::FollowedId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            (IDX_LIKES_PAIR, Likes.into_table_ref()),
            (IDX_VIEWS_PAIR, Views.into_table_ref()),
            (IDX_FOLLOWS_PAIR, Follows.into_table_ref()),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }

        Ok(())
    }
}
