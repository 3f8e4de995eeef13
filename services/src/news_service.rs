use crate::service::{AppError, ServiceResult};
use crate::validators::not_blank;
use chrono::Utc;
use db::models::json::StringList;
use db::models::news::{self, ActiveModel, Model};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewsInput {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = "not_blank", message = "Date is required"))]
    pub date: String,
    #[validate(custom(function = "not_blank", message = "Time is required"))]
    pub time: String,
    #[validate(custom(function = "not_blank", message = "Location is required"))]
    pub location: String,
    #[validate(custom(function = "not_blank", message = "Category is required"))]
    pub category: String,
}

fn apply(am: &mut ActiveModel, input: NewsInput) {
    am.title = Set(input.title.trim().to_string());
    am.description = Set(input.description);
    am.date = Set(input.date.trim().to_string());
    am.time = Set(input.time.trim().to_string());
    am.location = Set(input.location.trim().to_string());
    am.category = Set(input.category.trim().to_string());
}

pub struct NewsService;

impl NewsService {
    pub async fn create(
        db: &DatabaseConnection,
        input: NewsInput,
        images: Vec<String>,
    ) -> ServiceResult<Model> {
        input.validate()?;
        if images.is_empty() {
            return Err(AppError::validation("At least one image is required"));
        }

        let now = Utc::now();
        let mut am = ActiveModel {
            images: Set(StringList(images)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply(&mut am, input);
        Ok(am.insert(db).await?)
    }

    /// Returns the updated post and any image URLs it no longer uses.
    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        input: NewsInput,
        new_images: Option<Vec<String>>,
    ) -> ServiceResult<(Model, Vec<String>)> {
        input.validate()?;
        let existing = Self::get(db, id).await?;

        let mut am = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let mut replaced = Vec::new();
        if let Some(images) = new_images.filter(|i| !i.is_empty()) {
            replaced = existing.images.0;
            am.images = Set(StringList(images));
        }
        apply(&mut am, input);

        let model = am
            .update(db)
            .await
            .map_err(|e| AppError::from_db_missing(e, format!("News {id} not found")))?;
        Ok((model, replaced))
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        news::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("News {id} not found")))
    }

    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<Model>> {
        Ok(Model::list(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        let model = Self::get(db, id).await?;
        news::Entity::delete_by_id(id).exec(db).await?;
        Ok(model)
    }
}
