use sea_orm_migration::prelude::*;

use crate::m20260120_000001_create_page_tree::{Images, Pages};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Post index pages (one row per page, keyed by page id)
        manager.create_table(
            Table::create()
                .table(PostIndexes::Table)
                .if_not_exists()
                .col(ColumnDef::new(PostIndexes::PageId).big_integer().not_null().primary_key())
                .col(ColumnDef::new(PostIndexes::Intro).text().not_null().default(""))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_post_indexes_page_id")
                        .from(PostIndexes::Table, PostIndexes::PageId)
                        .to(Pages::Table, Pages::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // 2. Posts
        manager.create_table(
            Table::create()
                .table(Posts::Table)
                .if_not_exists()
                .col(ColumnDef::new(Posts::PageId).big_integer().not_null().primary_key())
                .col(ColumnDef::new(Posts::Date).date().not_null())
                .col(ColumnDef::new(Posts::Intro).string_len(255).not_null())
                .col(ColumnDef::new(Posts::Body).text().not_null().default(""))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_posts_page_id")
                        .from(Posts::Table, Posts::PageId)
                        .to(Pages::Table, Pages::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // 3. Gallery (orderable children of a post)
        manager.create_table(
            Table::create()
                .table(GalleryImages::Table)
                .if_not_exists()
                .col(ColumnDef::new(GalleryImages::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(GalleryImages::PostId).big_integer().not_null())
                .col(ColumnDef::new(GalleryImages::ImageId).big_integer().not_null())
                .col(ColumnDef::new(GalleryImages::Caption).string_len(255).not_null().default(""))
                .col(ColumnDef::new(GalleryImages::SortOrder).integer().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_gallery_images_post_id")
                        .from(GalleryImages::Table, GalleryImages::PostId)
                        .to(Posts::Table, Posts::PageId)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_gallery_images_image_id")
                        .from(GalleryImages::Table, GalleryImages::ImageId)
                        .to(Images::Table, Images::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_gallery_images_post_order")
                .table(GalleryImages::Table)
                .col(GalleryImages::PostId)
                .col(GalleryImages::SortOrder)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(GalleryImages::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Posts::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(PostIndexes::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum PostIndexes {
    Table,
    PageId,
    Intro,
}

#[derive(Iden)]
pub enum Posts {
    Table,
    PageId,
    Date,
    Intro,
    Body,
}

#[derive(Iden)]
enum GalleryImages {
    Table,
    Id,
    PostId,
    ImageId,
    Caption,
    SortOrder,
}
