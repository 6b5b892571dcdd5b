use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_with_indexes<E>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await?;

    for mut index in schema.create_index_from_entity(entity) {
        manager.create_index(index.if_not_exists().to_owned()).await?;
    }

    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve.
        create_with_indexes(manager, &schema, Users).await?;
        create_with_indexes(manager, &schema, Blogs).await?;
        create_with_indexes(manager, &schema, Comments).await?;
        create_with_indexes(manager, &schema, Likes).await?;
        create_with_indexes(manager, &schema, Follows).await?;
        create_with_indexes(manager, &schema, Views).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Views).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Follows).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Likes).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comments).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Blogs).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
