use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    #[sea_orm(string_value = "root")]
    Root,
    #[sea_orm(string_value = "post_index")]
    PostIndex,
    #[sea_orm(string_value = "post")]
    Post,
}

impl PageType {
    /// Which page types may be created directly below a page of this type.
    pub fn allows_child(self, child: PageType) -> bool {
        matches!(
            (self, child),
            (PageType::Root, PageType::PostIndex) | (PageType::PostIndex, PageType::Post)
        )
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i64,
    #[sea_orm(unique, index)]
    pub public_id: Uuid,

    pub parent_id: Option<i64>,
    #[sea_orm(unique)]
    pub path: String,
    pub depth: i32,

    pub title: String,
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub url_path: String,
    pub page_type: PageType,

    pub live: bool,
    pub first_published_at: Option<DateTimeUtc>,
    pub last_published_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Parent,
    #[sea_orm(has_one = "super::post::Entity")]
    Post,
    #[sea_orm(has_one = "super::post_index::Entity")]
    PostIndex,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::post_index::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostIndex.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
