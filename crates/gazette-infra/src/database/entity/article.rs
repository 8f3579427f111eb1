//! Article entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub photo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub publish: bool,
    pub views: i64,
    pub category_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Article.
impl From<Model> for gazette_core::domain::Article {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            photo: model.photo,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            publish: model.publish,
            views: model.views,
            category_id: model.category_id,
        }
    }
}

/// Conversion from Domain Article to SeaORM ActiveModel.
impl From<gazette_core::domain::Article> for ActiveModel {
    fn from(article: gazette_core::domain::Article) -> Self {
        Self {
            id: Set(article.id),
            title: Set(article.title),
            content: Set(article.content),
            photo: Set(article.photo),
            created_at: Set(article.created_at.into()),
            updated_at: Set(article.updated_at.into()),
            publish: Set(article.publish),
            views: Set(article.views),
            category_id: Set(article.category_id),
        }
    }
}
