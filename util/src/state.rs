//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds shared resources such as the database connection and the
//! media storage. It is cloned into handlers via Axum's `State<T>` extractor.

use crate::storage::MediaStorage;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The `MediaStorage` used for product images, news images and resumes.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    storage: MediaStorage,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and media storage.
    pub fn new(db: DatabaseConnection, storage: MediaStorage) -> Self {
        Self { db, storage }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the media storage.
    pub fn storage(&self) -> &MediaStorage {
        &self.storage
    }
}

impl AppState {
    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
