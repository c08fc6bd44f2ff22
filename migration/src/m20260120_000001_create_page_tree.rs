use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Image library
        manager.create_table(
            Table::create()
                .table(Images::Table)
                .if_not_exists()
                .col(ColumnDef::new(Images::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Images::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(Images::Title).string().not_null())
                .col(ColumnDef::new(Images::Url).string().not_null())
                .col(ColumnDef::new(Images::AltText).string().null())
                .col(ColumnDef::new(Images::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .to_owned(),
        ).await?;

        // 2. Page tree (materialized path)
        manager.create_table(
            Table::create()
                .table(Pages::Table)
                .if_not_exists()
                .col(ColumnDef::new(Pages::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Pages::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(Pages::ParentId).big_integer().null())
                .col(ColumnDef::new(Pages::Path).string().not_null().unique_key())
                .col(ColumnDef::new(Pages::Depth).integer().not_null())
                .col(ColumnDef::new(Pages::Title).string_len(255).not_null())
                .col(ColumnDef::new(Pages::Slug).string_len(255).not_null())
                .col(ColumnDef::new(Pages::UrlPath).text().not_null())
                .col(ColumnDef::new(Pages::PageType).string().not_null())
                .col(ColumnDef::new(Pages::Live).boolean().not_null().default(false))
                .col(ColumnDef::new(Pages::FirstPublishedAt).timestamp_with_time_zone().null())
                .col(ColumnDef::new(Pages::LastPublishedAt).timestamp_with_time_zone().null())
                .col(ColumnDef::new(Pages::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .col(ColumnDef::new(Pages::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pages_parent_id")
                        .from(Pages::Table, Pages::ParentId)
                        .to(Pages::Table, Pages::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        manager.create_index(Index::create().name("idx_pages_url_path").table(Pages::Table).col(Pages::UrlPath).to_owned()).await?;
        manager.create_index(
            Index::create()
                .name("idx_pages_parent_slug")
                .table(Pages::Table)
                .col(Pages::ParentId)
                .col(Pages::Slug)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pages::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Images::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
pub enum Images {
    Table,
    Id,
    PublicId,
    Title,
    Url,
    AltText,
    CreatedAt,
}

#[derive(Iden)]
pub enum Pages {
    Table,
    Id,
    PublicId,
    ParentId,
    Path,
    Depth,
    Title,
    Slug,
    UrlPath,
    PageType,
    Live,
    FirstPublishedAt,
    LastPublishedAt,
    CreatedAt,
    UpdatedAt,
}
