//! Domain services sitting between the HTTP handlers and the SeaORM models.
//!
//! Every operation returns [`service::ServiceResult`]; the API crate turns
//! [`service::AppError`] into status codes.

pub mod application_service;
pub mod career_service;
pub mod dashboard_service;
pub mod enquiry_service;
pub mod news_service;
pub mod order_service;
pub mod product_service;
pub mod service;
pub mod slug;
pub mod testimonial_service;
pub mod uploads;
pub mod user_service;
pub mod validators;

pub use service::{AppError, ServiceResult};
