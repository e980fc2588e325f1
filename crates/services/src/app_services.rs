use std::sync::Arc;

use azkar_core::catalog::Catalog;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::progress::ProgressService;

/// Assembles app-facing services over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the storage backend cannot be opened
    /// or migrated.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage).await)
    }

    /// Build services over an existing storage aggregate.
    pub async fn from_storage(storage: &Storage) -> Self {
        let progress =
            ProgressService::initialize(Catalog::builtin(), Arc::clone(&storage.progress)).await;

        Self {
            progress: Arc::new(progress),
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
