use crate::service::{AppError, ServiceResult};
use crate::validators::{no_blank_entries, not_blank};
use chrono::Utc;
use db::models::career::{self, ActiveModel, Model};
use db::models::json::StringList;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CareerInput {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Location is required"))]
    pub location: String,
    #[validate(custom(function = "not_blank", message = "Qualification is required"))]
    pub qualification: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    #[validate(
        length(min = 1, message = "At least one responsibility is required"),
        custom(function = "no_blank_entries", message = "Responsibilities must not be blank")
    )]
    pub responsibilities: Vec<String>,
    #[validate(
        length(min = 1, message = "At least one requirement is required"),
        custom(function = "no_blank_entries", message = "Requirements must not be blank")
    )]
    pub requirements: Vec<String>,
}

fn trimmed(items: Vec<String>) -> StringList {
    StringList(items.into_iter().map(|s| s.trim().to_string()).collect())
}

fn apply(am: &mut ActiveModel, input: CareerInput) {
    am.title = Set(input.title.trim().to_string());
    am.location = Set(input.location.trim().to_string());
    am.qualification = Set(input.qualification.trim().to_string());
    am.description = Set(input.description);
    am.responsibilities = Set(trimmed(input.responsibilities));
    am.requirements = Set(trimmed(input.requirements));
}

pub struct CareerService;

impl CareerService {
    pub async fn create(db: &DatabaseConnection, input: CareerInput) -> ServiceResult<Model> {
        input.validate()?;
        let now = Utc::now();
        let mut am = ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply(&mut am, input);
        Ok(am.insert(db).await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        input: CareerInput,
    ) -> ServiceResult<Model> {
        input.validate()?;
        let mut am = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        apply(&mut am, input);
        am.update(db)
            .await
            .map_err(|e| AppError::from_db_missing(e, format!("Career {id} not found")))
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        career::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Career {id} not found")))
    }

    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<Model>> {
        Ok(Model::list(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> ServiceResult<()> {
        if Model::delete(db, id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Career {id} not found")))
        }
    }
}
