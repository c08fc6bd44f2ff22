use sea_orm_migration::prelude::*;

use crate::m20260120_000001_create_page_tree::Images;
use crate::m20260120_000002_create_blog_tables::Posts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Tags
        manager.create_table(
            Table::create()
                .table(Tags::Table)
                .if_not_exists()
                .col(ColumnDef::new(Tags::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Tags::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(Tags::Name).string().not_null().unique_key())
                .col(ColumnDef::new(Tags::Slug).string().not_null().unique_key())
                .col(ColumnDef::new(Tags::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .to_owned(),
        ).await?;

        // 2. PostTags (Many-to-Many)
        manager.create_table(
            Table::create()
                .table(PostTags::Table)
                .if_not_exists()
                .col(ColumnDef::new(PostTags::PostId).big_integer().not_null())
                .col(ColumnDef::new(PostTags::TagId).big_integer().not_null())
                .primary_key(Index::create().col(PostTags::PostId).col(PostTags::TagId))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_post_tags_post_id")
                        .from(PostTags::Table, PostTags::PostId)
                        .to(Posts::Table, Posts::PageId)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_post_tags_tag_id")
                        .from(PostTags::Table, PostTags::TagId)
                        .to(Tags::Table, Tags::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // 3. Categories (icon is nulled when the image goes away)
        manager.create_table(
            Table::create()
                .table(Categories::Table)
                .if_not_exists()
                .col(ColumnDef::new(Categories::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Categories::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(Categories::Name).string_len(255).not_null())
                .col(ColumnDef::new(Categories::IconId).big_integer().null())
                .col(ColumnDef::new(Categories::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_categories_icon_id")
                        .from(Categories::Table, Categories::IconId)
                        .to(Images::Table, Images::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                )
                .to_owned(),
        ).await?;

        // 4. PostCategories (Many-to-Many)
        manager.create_table(
            Table::create()
                .table(PostCategories::Table)
                .if_not_exists()
                .col(ColumnDef::new(PostCategories::PostId).big_integer().not_null())
                .col(ColumnDef::new(PostCategories::CategoryId).big_integer().not_null())
                .primary_key(Index::create().col(PostCategories::PostId).col(PostCategories::CategoryId))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_post_categories_post_id")
                        .from(PostCategories::Table, PostCategories::PostId)
                        .to(Posts::Table, Posts::PageId)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_post_categories_category_id")
                        .from(PostCategories::Table, PostCategories::CategoryId)
                        .to(Categories::Table, Categories::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PostCategories::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Categories::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(PostTags::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Tags::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    PublicId,
    Name,
    Slug,
    CreatedAt,
}

#[derive(Iden)]
enum PostTags {
    Table,
    PostId,
    TagId,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    PublicId,
    Name,
    IconId,
    CreatedAt,
}

#[derive(Iden)]
enum PostCategories {
    Table,
    PostId,
    CategoryId,
}
