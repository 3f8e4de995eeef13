use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A job application with an uploaded resume.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub qualification: String,
    pub position: String,
    pub mobile: String,
    pub message: String,
    pub resume_url: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "shortlisted")]
    Shortlisted,

    #[sea_orm(string_value = "accepted")]
    Accepted,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub qualification: String,
    pub position: String,
    pub mobile: String,
    pub message: String,
    pub resume_url: String,
}

impl Model {
    pub async fn create(db: &DbConn, new: NewApplication) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            qualification: Set(new.qualification),
            position: Set(new.position),
            mobile: Set(new.mobile),
            message: Set(new.message),
            resume_url: Set(new.resume_url),
            status: Set(ApplicationStatus::Pending),
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

    pub async fn set_status(
        db: &DbConn,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Model, DbErr> {
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
