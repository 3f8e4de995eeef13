//! Product catalogue writes: slug allocation, edits, field updates, removal.

use crate::service::{AppError, ServiceResult};
use crate::slug::{is_slug_conflict, slug_candidate, slugify};
use chrono::Utc;
use db::models::json::{Specifications, StringList};
use db::models::product::{self, ActiveModel, Model};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use strum::{Display, EnumString};
use validator::Validate;

/// Attempts at finding a free slug before giving up with a conflict.
pub const MAX_SLUG_ATTEMPTS: u32 = 50;

/// Upper bound on images per product.
pub const MAX_PRODUCT_IMAGES: usize = 4;

/// Catalogue fields shared by add and edit.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub price: f64,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(range(min = 0, message = "Stock must be a non-negative integer"))]
    pub stock: i32,
    #[serde(rename = "model")]
    pub model_number: String,
    pub company: String,
    pub specifications: Specifications,
    pub features: StringList,
}

impl ProductInput {
    /// Validation plus the whitespace checks `validator` cannot express.
    pub fn check(&self) -> ServiceResult<()> {
        self.validate()?;
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Product name is required"));
        }
        if !self.price.is_finite() {
            return Err(AppError::validation("Price must be a non-negative number"));
        }
        Ok(())
    }
}

/// Columns that can be changed through `update-field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EditableField {
    Price,
    Stock,
}

fn check_images(images: &[String]) -> ServiceResult<()> {
    if images.is_empty() {
        return Err(AppError::validation("At least one product image is required"));
    }
    if images.len() > MAX_PRODUCT_IMAGES {
        return Err(AppError::validation(format!(
            "At most {MAX_PRODUCT_IMAGES} product images are allowed"
        )));
    }
    Ok(())
}

/// First candidate at or after `from` that no other product uses.
async fn probe_free_slug(
    db: &DatabaseConnection,
    base: &str,
    from: u32,
    exclude_id: Option<i64>,
) -> ServiceResult<(String, u32)> {
    for attempt in from..MAX_SLUG_ATTEMPTS {
        let candidate = slug_candidate(base, attempt);
        if !Model::slug_taken(db, &candidate, exclude_id).await? {
            return Ok((candidate, attempt));
        }
    }
    Err(AppError::Conflict(format!(
        "Could not allocate a unique slug for '{base}'"
    )))
}

fn apply_input(am: &mut ActiveModel, input: ProductInput) {
    am.name = Set(input.name.trim().to_string());
    am.description = Set(input.description);
    am.price = Set(input.price);
    am.category = Set(input.category);
    am.stock = Set(input.stock);
    am.model_number = Set(input.model_number);
    am.company = Set(input.company);
    am.specifications = Set(input.specifications);
    am.features = Set(input.features);
}

/// Writes `am` under the first free slug derived from `name`.
async fn save_with_slug(
    db: &DatabaseConnection,
    am: ActiveModel,
    name: &str,
    exclude_id: Option<i64>,
) -> ServiceResult<Model> {
    let base = slugify(name);
    let (_, attempt) = probe_free_slug(db, &base, 0, exclude_id).await?;
    write_slugged(db, am, &base, attempt, exclude_id).await
}

/// Writes `am` as `slug_candidate(base, attempt)`.
///
/// The probe only narrows the search; the unique index decides. A write that
/// loses a race probes again from the next suffix.
async fn write_slugged(
    db: &DatabaseConnection,
    am: ActiveModel,
    base: &str,
    mut attempt: u32,
    exclude_id: Option<i64>,
) -> ServiceResult<Model> {
    loop {
        let slug = slug_candidate(base, attempt);
        let mut candidate = am.clone();
        candidate.slug = Set(slug.clone());

        let result = if exclude_id.is_some() {
            candidate.update(db).await
        } else {
            candidate.insert(db).await
        };

        match result {
            Ok(model) => return Ok(model),
            Err(e) if is_slug_conflict(&e) => {
                tracing::warn!(slug = %slug, "Slug taken by a concurrent write, retrying");
                attempt = probe_free_slug(db, base, attempt + 1, exclude_id).await?.1;
            }
            Err(e) => {
                return Err(match exclude_id {
                    Some(id) => AppError::from_db_missing(e, format!("Product {id} not found")),
                    None => AppError::from(e),
                });
            }
        }
    }
}

pub struct ProductService;

impl ProductService {
    pub async fn create(
        db: &DatabaseConnection,
        input: ProductInput,
        images: Vec<String>,
    ) -> ServiceResult<Model> {
        input.check()?;
        check_images(&images)?;

        let name = input.name.clone();
        let now = Utc::now();
        let mut am = ActiveModel {
            images: Set(StringList(images)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_input(&mut am, input);

        let product = save_with_slug(db, am, &name, None).await?;
        tracing::info!(id = product.id, slug = %product.slug, "Product created");
        Ok(product)
    }

    /// Rewrites a product and recomputes its slug.
    ///
    /// Returns the updated row and the image URLs that were replaced, so the
    /// caller can drop them from storage.
    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        input: ProductInput,
        new_images: Option<Vec<String>>,
    ) -> ServiceResult<(Model, Vec<String>)> {
        input.check()?;
        let existing = Self::find_by_id(db, id).await?;

        let mut am = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let mut replaced = Vec::new();
        if let Some(images) = new_images {
            check_images(&images)?;
            replaced = existing.images.0.clone();
            am.images = Set(StringList(images));
        }

        let name = input.name.clone();
        apply_input(&mut am, input);

        let product = save_with_slug(db, am, &name, Some(id)).await?;
        tracing::info!(id, slug = %product.slug, "Product updated");
        Ok((product, replaced))
    }

    /// Sets `price` or `stock` to `value`.
    pub async fn update_field(
        db: &DatabaseConnection,
        id: i64,
        field: &str,
        value: f64,
    ) -> ServiceResult<Model> {
        let field: EditableField = field.trim().parse().map_err(|_| {
            AppError::validation(format!(
                "Field '{field}' cannot be updated; allowed fields are price and stock"
            ))
        })?;

        if !value.is_finite() || value < 0.0 {
            return Err(AppError::validation(format!(
                "{field} must be a non-negative number"
            )));
        }

        let mut am = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        match field {
            EditableField::Price => am.price = Set(value),
            EditableField::Stock => {
                if value.fract() != 0.0 || value > f64::from(i32::MAX) {
                    return Err(AppError::validation("stock must be a whole number"));
                }
                am.stock = Set(value as i32);
            }
        }

        am.update(db)
            .await
            .map_err(|e| AppError::from_db_missing(e, format!("Product {id} not found")))
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        product::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    pub async fn find_by_slug(db: &DatabaseConnection, slug: &str) -> ServiceResult<Model> {
        Model::find_by_slug(db, slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product '{slug}' not found")))
    }

    /// Deletes a product and hands back the removed row.
    pub async fn remove(db: &DatabaseConnection, id: i64) -> ServiceResult<Model> {
        let product = Self::find_by_id(db, id).await?;
        if !Model::delete(db, id).await? {
            return Err(AppError::not_found(format!("Product {id} not found")));
        }
        tracing::info!(id, "Product removed");
        Ok(product)
    }
}
