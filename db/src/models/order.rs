use super::json::Address;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub address: Address,
    pub payment_method: PaymentMethod,
    /// Whether the order has been paid for. Cash-on-delivery orders start unpaid.
    pub payment: bool,
    pub amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fulfilment stage of an order, in the order the warehouse moves through them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(ascii_case_insensitive)]
pub enum OrderStatus {
    #[sea_orm(string_value = "Order Placed")]
    #[serde(rename = "Order Placed")]
    #[strum(serialize = "Order Placed")]
    OrderPlaced,

    #[sea_orm(string_value = "Packing")]
    #[serde(rename = "Packing")]
    #[strum(serialize = "Packing")]
    Packing,

    #[sea_orm(string_value = "Shipped")]
    #[serde(rename = "Shipped")]
    #[strum(serialize = "Shipped")]
    Shipped,

    #[sea_orm(string_value = "Out for delivery")]
    #[serde(rename = "Out for delivery")]
    #[strum(serialize = "Out for delivery")]
    OutForDelivery,

    #[sea_orm(string_value = "Delivered")]
    #[serde(rename = "Delivered")]
    #[strum(serialize = "Delivered")]
    Delivered,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PaymentMethod {
    #[sea_orm(string_value = "cod")]
    Cod,

    #[sea_orm(string_value = "razorpay")]
    Razorpay,

    #[sea_orm(string_value = "stripe")]
    Stripe,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Every order, newest first.
    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn list_for_user(db: &DbConn, user_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn set_status(db: &DbConn, id: i64, status: OrderStatus) -> Result<Model, DbErr> {
        ActiveModel {
            id: Set(id),
            status: Set(status),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(db)
        .await
    }
}
