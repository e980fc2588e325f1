use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

use azkar_core::model::ProgressMap;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the persisted progress map.
///
/// Exactly one map is ever stored. `save` overwrites it wholesale (last
/// write wins, no merge) and `load` returns `None` when nothing has been
/// stored yet. Callers treat every error as absence: the persisted copy is
/// best-effort durability, never the source of truth.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the stored map, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the medium cannot be read or
    /// `StorageError::Serialization` if the stored content is malformed.
    async fn load(&self) -> Result<Option<ProgressMap>, StorageError>;

    /// Serialize the full map and overwrite the stored value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the map cannot be stored.
    async fn save(&self, map: &ProgressMap) -> Result<(), StorageError>;

    /// Remove the stored value entirely. Clearing an empty store is `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Operation counters and a failure toggle let tests assert what the store
/// scheduled (or deliberately did not schedule) and exercise degraded
/// persistence.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    stored: Arc<Mutex<Option<ProgressMap>>>,
    failing: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
    clears: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with a connection error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of completed `save` calls (failed attempts do not count).
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of completed `clear` calls (failed attempts do not count).
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("injected failure".to_owned()));
        }
        Ok(())
    }

    fn lock_stored(&self) -> Result<std::sync::MutexGuard<'_, Option<ProgressMap>>, StorageError> {
        self.stored
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load(&self) -> Result<Option<ProgressMap>, StorageError> {
        self.check_available()?;
        let guard = self.lock_stored()?;
        Ok(guard.clone())
    }

    async fn save(&self, map: &ProgressMap) -> Result<(), StorageError> {
        self.check_available()?;
        let mut guard = self.lock_stored()?;
        *guard = Some(map.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.check_available()?;
        let mut guard = self.lock_stored()?;
        *guard = None;
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Aggregates the progress repository behind a trait object for easy
/// backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azkar_core::model::ItemId;

    fn build_map(entries: &[(u32, u32)]) -> ProgressMap {
        let mut map = ProgressMap::new();
        for &(id, remaining) in entries {
            map.insert(ItemId::new(id), remaining);
        }
        map
    }

    #[tokio::test]
    async fn round_trips_a_saved_map() {
        let repo = InMemoryRepository::new();
        let map = build_map(&[(3, 1), (20, 97)]);

        repo.save(&map).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), Some(map));
        assert_eq!(repo.save_count(), 1);
    }

    #[tokio::test]
    async fn fresh_repository_loads_nothing() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_overwrites_the_previous_value() {
        let repo = InMemoryRepository::new();
        repo.save(&build_map(&[(1, 1)])).await.unwrap();
        repo.save(&build_map(&[(1, 0), (2, 4)])).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), Some(build_map(&[(1, 0), (2, 4)])));
    }

    #[tokio::test]
    async fn clear_removes_the_stored_value() {
        let repo = InMemoryRepository::new();
        repo.save(&build_map(&[(1, 1)])).await.unwrap();

        repo.clear().await.unwrap();
        assert_eq!(repo.load().await.unwrap(), None);

        // Clearing again is fine.
        repo.clear().await.unwrap();
        assert_eq!(repo.clear_count(), 2);
    }

    #[tokio::test]
    async fn failing_toggle_injects_connection_errors() {
        let repo = InMemoryRepository::new();
        repo.set_failing(true);

        assert!(matches!(
            repo.load().await.unwrap_err(),
            StorageError::Connection(_)
        ));
        assert!(repo.save(&ProgressMap::new()).await.is_err());
        assert!(repo.clear().await.is_err());
        assert_eq!(repo.save_count(), 0);

        repo.set_failing(false);
        assert_eq!(repo.load().await.unwrap(), None);
    }
}
