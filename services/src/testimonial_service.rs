use crate::service::{AppError, ServiceResult};
use crate::validators::not_blank;
use chrono::Utc;
use db::models::testimonial::{self, ActiveModel, Model};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialInput {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[validate(custom(function = "not_blank", message = "Content is required"))]
    pub content: String,
    #[validate(url(message = "Video URL must be a valid URL"))]
    pub video_url: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Stars must be between 1 and 5"))]
    pub stars: i32,
}

impl TestimonialInput {
    fn normalized_video(&self) -> Option<String> {
        self.video_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// A testimonial is expected to carry an image or a video, but is accepted without.
fn warn_if_no_media(name: &str, image: Option<&str>, video: Option<&str>) {
    if image.is_none() && video.is_none() {
        tracing::warn!(name, "Testimonial saved without image or video");
    }
}

pub struct TestimonialService;

impl TestimonialService {
    pub async fn create(
        db: &DatabaseConnection,
        mut input: TestimonialInput,
        image: Option<String>,
    ) -> ServiceResult<Model> {
        input.video_url = input.normalized_video();
        input.validate()?;
        warn_if_no_media(&input.name, image.as_deref(), input.video_url.as_deref());

        let now = Utc::now();
        let model = ActiveModel {
            name: Set(input.name.trim().to_string()),
            position: Set(input.position.trim().to_string()),
            content: Set(input.content),
            image: Set(image),
            video_url: Set(input.video_url),
            stars: Set(input.stars),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(model)
    }

    /// Updates a testimonial. A new image replaces the old one, whose URL is
    /// returned for cleanup.
    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        mut input: TestimonialInput,
        new_image: Option<String>,
    ) -> ServiceResult<(Model, Option<String>)> {
        input.video_url = input.normalized_video();
        input.validate()?;
        let existing = Self::get(db, id).await?;

        let mut am = ActiveModel {
            id: Set(id),
            name: Set(input.name.trim().to_string()),
            position: Set(input.position.trim().to_string()),
            content: Set(input.content),
            video_url: Set(input.video_url.clone()),
            stars: Set(input.stars),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let mut replaced = None;
        let image = match new_image {
            Some(url) => {
                replaced = existing.image;
                am.image = Set(Some(url.clone()));
                Some(url)
            }
            None => existing.image,
        };
        warn_if_no_media(&input.name, image.as_deref(), input.video_url.as_deref());

        let model = am
            .update(db)
            .await
            .map_err(|e| AppError::from_db_missing(e, format!("Testimonial {id} not found")))?;
        Ok((model, replaced))
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        testimonial::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Testimonial {id} not found")))
    }

    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<Model>> {
        Ok(Model::list(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        let model = Self::get(db, id).await?;
        testimonial::Entity::delete_by_id(id).exec(db).await?;
        Ok(model)
    }
}
