//! Helpers shared by the route modules: a JSON extractor that answers with the
//! error envelope, multipart form reading, and media upload.

use crate::response::fail;
use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use bytes::Bytes;
use futures::future::try_join_all;
use serde::{Deserialize, de::DeserializeOwned};
use services::AppError;
use services::uploads::UploadRule;
use std::collections::HashMap;
use std::str::FromStr;
use util::storage::MediaStorage;

/// `Json<T>` whose rejections are `400` envelopes instead of plain text.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(fail(StatusCode::BAD_REQUEST, rejection.body_text())),
        }
    }
}

/// `{ "id": 1 }`
#[derive(Debug, Deserialize)]
pub struct IdPayload {
    pub id: i64,
}

/// A file part of a multipart form, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A multipart form split into text fields and file parts.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Reads every part. Parts with a file name are files; the rest are text.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if field.file_name().is_some() {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Could not read {name}: {e}")))?;
                // Browsers send an empty part for file inputs left blank.
                if !bytes.is_empty() {
                    form.files.push(UploadedFile { field: name, content_type, bytes });
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Could not read {name}: {e}")))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Text field or empty string.
    pub fn string(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    pub fn optional(&self, name: &str) -> Option<String> {
        self.text(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn required(&self, name: &str) -> Result<String, AppError> {
        self.optional(name)
            .ok_or_else(|| AppError::validation(format!("{name} is required")))
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, AppError> {
        self.required(name)?
            .parse()
            .map_err(|_| AppError::validation(format!("{name} is invalid")))
    }

    /// A field holding JSON. Missing or blank fields yield `T::default()`.
    pub fn json<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, AppError> {
        match self.optional(name) {
            None => Ok(T::default()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| AppError::validation(format!("{name} must be valid JSON: {e}"))),
        }
    }

    /// Removes and returns file parts whose field name satisfies `pred`.
    pub fn take_files(&mut self, pred: impl Fn(&str) -> bool) -> Vec<UploadedFile> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|f| pred(&f.field));
        self.files = kept;
        taken
    }
}

/// Checks every file against `rule`, then stores them all concurrently.
///
/// Nothing is written unless every file passes. Returns public URLs in input order.
pub async fn store_files(
    storage: &MediaStorage,
    folder: &str,
    rule: &UploadRule,
    files: &[UploadedFile],
) -> Result<Vec<String>, AppError> {
    let extensions = files
        .iter()
        .map(|f| rule.check(f.content_type.as_deref(), f.bytes.len()))
        .collect::<Result<Vec<_>, _>>()?;

    let stored = try_join_all(
        files
            .iter()
            .zip(extensions)
            .map(|(file, ext)| storage.store(folder, ext, &file.bytes)),
    )
    .await?;

    Ok(stored.into_iter().map(|s| s.url).collect())
}

/// Best-effort removal of files that are no longer referenced.
pub async fn discard_files(storage: &MediaStorage, urls: &[String]) {
    for url in urls {
        storage.remove(url).await;
    }
}
