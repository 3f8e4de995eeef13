use crate::response::{created, error_response, ok};
use crate::routes::common::{IdPayload, JsonBody, MultipartForm, UploadedFile, discard_files, store_files};
use axum::{
    extract::{Multipart, State},
    response::Response,
};
use db::models::product;
use serde::Deserialize;
use services::AppError;
use services::product_service::{MAX_PRODUCT_IMAGES, ProductInput, ProductService};
use services::uploads::IMAGE;
use util::state::AppState;

const IMAGE_FOLDER: &str = "products";

fn product_input(form: &MultipartForm) -> Result<ProductInput, AppError> {
    Ok(ProductInput {
        name: form.string("name"),
        description: form.string("description"),
        price: form.parse("price")?,
        category: form.string("category"),
        stock: form.parse("stock")?,
        model_number: form.string("model"),
        company: form.string("company"),
        specifications: form.json("specifications")?,
        features: form.json("features")?,
    })
}

/// `image1` .. `image4`, in field order, one file per field.
fn image_parts(form: &mut MultipartForm) -> Vec<UploadedFile> {
    let mut files = form.take_files(|name| {
        name.strip_prefix("image")
            .and_then(|n| n.parse::<usize>().ok())
            .is_some_and(|n| (1..=MAX_PRODUCT_IMAGES).contains(&n))
    });
    // Stable sort keeps the first upload of a repeated field.
    files.sort_by(|a, b| a.field.cmp(&b.field));
    files.dedup_by(|a, b| a.field == b.field);
    files
}

/// POST /product/add
///
/// Multipart form with `name, description, price, category, stock, model,
/// company, specifications` (JSON `[{key, value}]`), `features` (JSON
/// `[string]`) and files `image1`..`image4`.
///
/// - `201 Created` with the product, including its allocated `slug`
/// - `400 Bad Request` on invalid fields, no image, or a rejected image
/// - `409 Conflict` if no free slug could be allocated
pub async fn add_product(State(state): State<AppState>, multipart: Multipart) -> Response {
    match create_from_form(&state, multipart).await {
        Ok(product) => created(product, "Product added"),
        Err(e) => error_response(e),
    }
}

async fn create_from_form(state: &AppState, multipart: Multipart) -> Result<product::Model, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let input = product_input(&form)?;
    input.check()?;
    let images = image_parts(&mut form);
    if images.is_empty() {
        return Err(AppError::validation("At least one product image is required"));
    }

    let urls = store_files(state.storage(), IMAGE_FOLDER, &IMAGE, &images).await?;
    match ProductService::create(state.db(), input, urls.clone()).await {
        Ok(product) => Ok(product),
        Err(e) => {
            discard_files(state.storage(), &urls).await;
            Err(e)
        }
    }
}

/// POST /product/edit
///
/// Same form as add, plus `id`. Images are replaced only if new files are sent.
pub async fn edit_product(State(state): State<AppState>, multipart: Multipart) -> Response {
    match update_from_form(&state, multipart).await {
        Ok(product) => ok(product, "Product updated"),
        Err(e) => error_response(e),
    }
}

async fn update_from_form(state: &AppState, multipart: Multipart) -> Result<product::Model, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let id: i64 = form.parse("id")?;
    let input = product_input(&form)?;
    input.check()?;
    let images = image_parts(&mut form);

    let new_urls = if images.is_empty() {
        None
    } else {
        Some(store_files(state.storage(), IMAGE_FOLDER, &IMAGE, &images).await?)
    };

    match ProductService::update(state.db(), id, input, new_urls.clone()).await {
        Ok((product, replaced)) => {
            discard_files(state.storage(), &replaced).await;
            Ok(product)
        }
        Err(e) => {
            if let Some(urls) = &new_urls {
                discard_files(state.storage(), urls).await;
            }
            Err(e)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleProductRequest {
    pub product_id: i64,
}

/// POST /product/single
///
/// `{ "productId": 1 }`
pub async fn single_product(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SingleProductRequest>,
) -> Response {
    match ProductService::find_by_id(state.db(), req.product_id).await {
        Ok(product) => ok(product, "Product retrieved"),
        Err(e) => error_response(e),
    }
}

/// POST /product/remove
///
/// `{ "id": 1 }`. `404` if no such product.
pub async fn remove_product(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<IdPayload>,
) -> Response {
    match ProductService::remove(state.db(), req.id).await {
        Ok(product) => {
            discard_files(state.storage(), &product.images.0).await;
            ok((), "Product removed")
        }
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateFieldRequest {
    pub id: i64,
    pub field: String,
    pub value: f64,
}

/// POST /product/update-field
///
/// `{ "id": 1, "field": "stock", "value": 12 }`. Only `price` and `stock`
/// are accepted; negative values and fractional stock are rejected.
pub async fn update_field(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateFieldRequest>,
) -> Response {
    match ProductService::update_field(state.db(), req.id, &req.field, req.value).await {
        Ok(product) => ok(product, format!("Product {} updated", req.field)),
        Err(e) => error_response(e),
    }
}
