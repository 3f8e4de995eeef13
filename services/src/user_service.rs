use crate::service::{AppError, ServiceResult};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use db::models::json::CartData;
use db::models::product;
use db::models::user::{self, Model};
use rand::rngs::OsRng;
use sea_orm::{DatabaseConnection, EntityTrait, SqlErr};
use serde::Deserialize;
use util::config;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub struct UserService;

impl UserService {
    pub async fn register(db: &DatabaseConnection, mut req: RegisterUser) -> ServiceResult<Model> {
        req.email = req.email.trim().to_string();
        req.validate()?;
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if Model::email_exists(db, &req.email).await? {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let hash = Self::hash_password(&req.password)?;
        let user = Model::create(db, req.name.trim(), &req.email, &hash)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::Conflict("User already exists".into())
                }
                _ => AppError::from(e),
            })?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Looks the user up by email and checks the password.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        creds: &Credentials,
    ) -> ServiceResult<Model> {
        creds.validate()?;
        match Model::find_by_email(db, creds.email.trim()).await? {
            Some(user) if Self::verify_password(&user, &creds.password) => Ok(user),
            _ => Err(AppError::Unauthorized("Invalid credentials".into())),
        }
    }

    /// Checks credentials against `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
    ///
    /// Admin login is disabled while either is unset.
    pub fn verify_admin(creds: &Credentials) -> ServiceResult<()> {
        let email = config::admin_email();
        let password = config::admin_password();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Unauthorized("Admin login is not configured".into()));
        }
        if creds.email.trim().eq_ignore_ascii_case(&email) && creds.password == password {
            Ok(())
        } else {
            Err(AppError::Unauthorized("Invalid credentials".into()))
        }
    }

    pub fn hash_password(password: &str) -> ServiceResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Storage(format!("password hashing failed: {e}")))
    }

    pub fn verify_password(user: &Model, password: &str) -> bool {
        let parsed = match PasswordHash::new(&user.password_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        user::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    // --- Cart ---

    pub async fn cart(db: &DatabaseConnection, user_id: i64) -> ServiceResult<CartData> {
        Ok(Self::find_by_id(db, user_id).await?.cart_data)
    }

    /// Adds one unit of `product_id` to the cart.
    pub async fn add_to_cart(
        db: &DatabaseConnection,
        user_id: i64,
        product_id: i64,
    ) -> ServiceResult<CartData> {
        let user = Self::find_by_id(db, user_id).await?;
        if product::Entity::find_by_id(product_id).one(db).await?.is_none() {
            return Err(AppError::not_found(format!("Product {product_id} not found")));
        }

        let mut cart = user.cart_data;
        *cart.0.entry(product_id).or_insert(0) += 1;
        Ok(Model::set_cart(db, user_id, cart).await?.cart_data)
    }

    /// Sets the quantity for `product_id`; zero removes the line.
    pub async fn update_cart(
        db: &DatabaseConnection,
        user_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> ServiceResult<CartData> {
        if quantity < 0 {
            return Err(AppError::validation("Quantity cannot be negative"));
        }
        let mut cart = Self::find_by_id(db, user_id).await?.cart_data;
        if quantity == 0 {
            cart.0.remove(&product_id);
        } else {
            cart.0.insert(product_id, quantity);
        }
        Ok(Model::set_cart(db, user_id, cart).await?.cart_data)
    }
}
