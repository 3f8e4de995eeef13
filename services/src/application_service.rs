use crate::service::{AppError, ServiceResult};
use crate::validators::{not_blank, valid_phone};
use db::models::application::{self, ApplicationStatus, Model, NewApplication};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Deserialize;
use validator::Validate;

/// Text fields of a job application. The resume travels separately.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplication {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Qualification is required"))]
    pub qualification: String,
    #[validate(custom(function = "not_blank", message = "Position is required"))]
    pub position: String,
    #[validate(custom(function = "valid_phone", message = "Please enter a valid mobile number"))]
    pub mobile: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Message is too long"))]
    pub message: String,
}

pub struct ApplicationService;

impl ApplicationService {
    pub async fn submit(
        db: &DatabaseConnection,
        req: SubmitApplication,
        resume_url: String,
    ) -> ServiceResult<Model> {
        req.validate()?;
        let app = Model::create(
            db,
            NewApplication {
                name: req.name.trim().to_string(),
                email: req.email.trim().to_string(),
                qualification: req.qualification.trim().to_string(),
                position: req.position.trim().to_string(),
                mobile: req.mobile.trim().to_string(),
                message: req.message,
                resume_url,
            },
        )
        .await?;
        tracing::info!(application_id = app.id, position = %app.position, "Application received");
        Ok(app)
    }

    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<Model>> {
        Ok(Model::list(db).await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        application::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Application {id} not found")))
    }

    pub async fn update_status(
        db: &DatabaseConnection,
        id: i64,
        status: ApplicationStatus,
    ) -> ServiceResult<Model> {
        Model::set_status(db, id, status)
            .await
            .map_err(|e| AppError::from_db_missing(e, format!("Application {id} not found")))
    }

    /// Deletes the application and returns it so the caller can drop the resume.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        let app = Self::get(db, id).await?;
        application::Entity::delete_by_id(id).exec(db).await?;
        Ok(app)
    }
}
