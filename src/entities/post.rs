use sea_orm::{entity::prelude::*, QueryOrder};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(skip_serializing)]
    pub page_id: i64,
    pub date: Date,
    pub intro: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::PageId",
        to = "super::page::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Page,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
    #[sea_orm(has_many = "super::post_category::Entity")]
    PostCategory,
    #[sea_orm(has_many = "super::gallery_image::Entity")]
    GalleryImage,
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Page.def()
    }
}

impl Related<super::gallery_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryImage.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_category::Relation::Category.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::post_category::Relation::Post.def().rev())
    }
}

impl Model {
    /// Image of the first gallery item by sort order, `None` for an empty gallery.
    pub async fn main_image<C: ConnectionTrait>(&self, db: &C) -> Result<Option<super::image::Model>, DbErr> {
        let first = super::gallery_image::Entity::find()
            .filter(super::gallery_image::Column::PostId.eq(self.page_id))
            .order_by_asc(super::gallery_image::Column::SortOrder)
            .find_also_related(super::image::Entity)
            .one(db)
            .await?;
        Ok(first.and_then(|(_, image)| image))
    }
}

impl ActiveModelBehavior for ActiveModel {}
