use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use azkar_core::model::ProgressMap;

use crate::repository::{ProgressRepository, StorageError};

use super::SqliteRepository;

/// Fixed key the serialized progress object is stored under.
///
/// Kept identical to the key the mobile app has always used, so an
/// existing store remains readable.
pub const PROGRESS_KEY: &str = "azkarProgress";

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load(&self) -> Result<Option<ProgressMap>, StorageError> {
        let row = sqlx::query("SELECT value FROM progress WHERE key = ?1")
            .bind(PROGRESS_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        serde_json::from_str(&value)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save(&self, map: &ProgressMap) -> Result<(), StorageError> {
        let value = serde_json::to_string(map)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO progress (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(PROGRESS_KEY)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM progress WHERE key = ?1")
            .bind(PROGRESS_KEY)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
