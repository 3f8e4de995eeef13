use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A product enquiry (sales lead) submitted from the storefront.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enquiries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub email: String,
    pub quantity: i32,
    pub mobile_no: String,
    pub country: String,
    pub status: EnquiryStatus,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EnquiryStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "contacted")]
    Contacted,

    #[sea_orm(string_value = "completed")]
    Completed,

    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields captured by the public enquiry form.
#[derive(Debug, Clone)]
pub struct NewEnquiry {
    pub product_id: i64,
    pub product_name: String,
    pub email: String,
    pub quantity: i32,
    pub mobile_no: String,
    pub country: String,
    pub user_id: Option<i64>,
}

impl Model {
    pub async fn create(db: &DbConn, new: NewEnquiry) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            product_id: Set(new.product_id),
            product_name: Set(new.product_name),
            email: Set(new.email),
            quantity: Set(new.quantity),
            mobile_no: Set(new.mobile_no),
            country: Set(new.country),
            status: Set(EnquiryStatus::Pending),
            user_id: Set(new.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

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
            .all(db)
            .await
    }

    pub async fn set_status(db: &DbConn, id: i64, status: EnquiryStatus) -> Result<Model, DbErr> {
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
