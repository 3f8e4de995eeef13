use super::json::CartData;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryFilter};

/// Represents a storefront customer in the `users` table.
///
/// Administrators are not stored here; they authenticate against the
/// configured admin credentials.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Unique, stored lowercase.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub cart_data: CartData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_lowercase()),
            password_hash: Set(password_hash.to_owned()),
            cart_data: Set(CartData::default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.to_lowercase()))
            .one(db)
            .await
    }

    pub async fn email_exists(db: &DbConn, email: &str) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::Email.eq(email.to_lowercase()))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn set_cart(db: &DbConn, id: i64, cart: CartData) -> Result<Model, DbErr> {
        ActiveModel {
            id: Set(id),
            cart_data: Set(cart),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(db)
        .await
    }
}
