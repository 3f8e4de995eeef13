use super::json::{Specifications, StringList};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

/// A catalogue entry in the `products` table.
///
/// `slug` carries a unique index; writers allocate it through the
/// conflict-retrying helpers in the services crate.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: String,
    pub price: f64,
    /// One to four image URLs.
    #[serde(rename = "image")]
    pub images: StringList,
    pub category: String,
    pub stock: i32,
    #[sea_orm(column_name = "model")]
    #[serde(rename = "model")]
    pub model_number: String,
    pub company: String,
    pub specifications: Specifications,
    pub features: StringList,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// All products, newest first.
    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_slug(db: &DbConn, slug: &str) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Slug.eq(slug)).one(db).await
    }

    /// Whether `slug` is used by any product other than `exclude_id`.
    pub async fn slug_taken(
        db: &DbConn,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut query = Entity::find().filter(Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.one(db).await?.is_some())
    }

    /// Deletes by id. Returns `false` when no row matched.
    pub async fn delete(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
