use sea_orm::entity::prelude::*;
use sea_orm::QueryFilter;
use serde::{Deserialize, Serialize};

/// One line of an order. Name and price are copied from the product at checkout.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub order_id: i64,
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub size: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn for_orders(db: &DbConn, order_ids: Vec<i64>) -> Result<Vec<Model>, DbErr> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::OrderId.is_in(order_ids))
            .all(db)
            .await
    }
}
