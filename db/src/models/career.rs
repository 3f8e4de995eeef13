use super::json::StringList;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

/// An open position shown on the careers page.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "careers")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub location: String,
    pub qualification: String,
    pub description: String,
    pub responsibilities: StringList,
    pub requirements: StringList,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
