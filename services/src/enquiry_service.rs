use crate::service::{AppError, ServiceResult};
use crate::validators::valid_phone;
use db::models::enquiry::{EnquiryStatus, Model, NewEnquiry};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use validator::Validate;

/// Public enquiry form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEnquiry {
    pub product_id: i64,
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(custom(function = "valid_phone", message = "Please enter a valid mobile number"))]
    pub mobile_no: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
}

pub struct EnquiryService;

impl EnquiryService {
    /// Validates and stores an enquiry. `user_id` is set when the form was
    /// submitted with a user token.
    pub async fn submit(
        db: &DatabaseConnection,
        req: SubmitEnquiry,
        user_id: Option<i64>,
    ) -> ServiceResult<Model> {
        req.validate()?;

        let enquiry = Model::create(
            db,
            NewEnquiry {
                product_id: req.product_id,
                product_name: req.product_name.trim().to_string(),
                email: req.email.trim().to_string(),
                quantity: req.quantity,
                mobile_no: req.mobile_no.trim().to_string(),
                country: req.country.trim().to_string(),
                user_id,
            },
        )
        .await?;

        tracing::info!(enquiry_id = enquiry.id, product = %enquiry.product_name, "Enquiry stored");
        Ok(enquiry)
    }

    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<Model>> {
        Ok(Model::list(db).await?)
    }

    pub async fn list_for_user(db: &DatabaseConnection, user_id: i64) -> ServiceResult<Vec<Model>> {
        Ok(Model::list_for_user(db, user_id).await?)
    }

    pub async fn update_status(
        db: &DatabaseConnection,
        id: i64,
        status: EnquiryStatus,
    ) -> ServiceResult<Model> {
        Model::set_status(db, id, status)
            .await
            .map_err(|e| AppError::from_db_missing(e, format!("Enquiry {id} not found")))
    }
}
