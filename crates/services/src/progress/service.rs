use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use azkar_core::catalog::Catalog;
use azkar_core::model::{Category, ItemId, ProgressMap};
use storage::repository::ProgressRepository;

use super::view::CategoryProgress;

/// Single source of truth for per-item remaining counts.
///
/// The service owns the in-memory map for the whole session; the
/// repository only mirrors committed state and never originates it.
/// Mutations apply synchronously, then a save of the full map is scheduled
/// on the ambient Tokio runtime (fire-and-forget) — a failed write degrades
/// durability, never the running session. Mutating methods therefore must
/// run inside a Tokio runtime.
///
/// Constructed once per session and handed to the rendering surface by
/// `Arc`.
pub struct ProgressService {
    catalog: &'static Catalog,
    state: Mutex<ProgressMap>,
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    /// Load persisted progress, falling back to a fresh map.
    ///
    /// A missing value, a failed load, and a corrupt payload all start the
    /// session from the not-yet-started state; the failure is logged and
    /// never surfaced to callers. Loaded maps are clamped to the catalog
    /// so a stale payload cannot violate the remaining-count invariant.
    pub async fn initialize(catalog: &'static Catalog, repo: Arc<dyn ProgressRepository>) -> Self {
        let state = match repo.load().await {
            Ok(Some(map)) => map.clamp_to(catalog),
            Ok(None) => ProgressMap::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load stored progress, starting fresh");
                ProgressMap::new()
            }
        };

        Self {
            catalog,
            state: Mutex::new(state),
            repo,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Effective remaining count for `id` (absence means the item's
    /// initial count).
    ///
    /// `id` must name a catalog item; an unknown id is a caller error and
    /// reads as already complete.
    #[must_use]
    pub fn get_remaining(&self, id: ItemId) -> u32 {
        debug_assert!(self.catalog.contains(id), "unknown item id {id}");
        let Some(item) = self.catalog.get(id) else {
            return 0;
        };
        self.lock_state().remaining_for(item)
    }

    #[must_use]
    pub fn is_completed(&self, id: ItemId) -> bool {
        self.get_remaining(id) == 0
    }

    /// Record one recitation and return the new remaining count.
    ///
    /// Decrements by exactly one and schedules a background save of the
    /// full map. An already-completed item is a no-op: the count stays at
    /// zero and no save is scheduled.
    pub fn decrement(&self, id: ItemId) -> u32 {
        debug_assert!(self.catalog.contains(id), "unknown item id {id}");
        let Some(item) = self.catalog.get(id) else {
            return 0;
        };

        let (next, snapshot) = {
            let mut state = self.lock_state();
            if state.is_completed(item) {
                return 0;
            }
            let next = state.decrement(item);
            (next, state.clone())
        };

        self.spawn_save(snapshot);
        next
    }

    /// Fraction of the category's items that are completed, in `[0, 1]`.
    #[must_use]
    pub fn category_progress(&self, category: Category) -> f32 {
        let items = self.catalog.items(category);
        self.lock_state().completed_fraction(items)
    }

    /// Aggregated completion view for the rendering surface.
    #[must_use]
    pub fn progress_view(&self, category: Category) -> CategoryProgress {
        let items = self.catalog.items(category);
        let state = self.lock_state();
        let completed = items.iter().filter(|item| state.is_completed(item)).count();

        CategoryProgress {
            total: items.len(),
            completed,
            fraction: state.completed_fraction(items),
        }
    }

    /// Return every item to the not-yet-started state.
    ///
    /// Idempotent; resetting an already-empty store schedules no I/O.
    pub fn reset(&self) {
        {
            let mut state = self.lock_state();
            if state.is_empty() {
                return;
            }
            state.clear();
        }

        let repo = Arc::clone(&self.repo);
        tokio::spawn(async move {
            if let Err(err) = repo.clear().await {
                tracing::warn!(error = %err, "failed to clear stored progress");
            }
        });
    }

    /// Cloned copy of the committed state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressMap {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, ProgressMap> {
        // A poisoned lock can only come from a panic in another accessor;
        // the map itself is never left mid-mutation.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_save(&self, snapshot: ProgressMap) {
        let repo = Arc::clone(&self.repo);
        tokio::spawn(async move {
            if let Err(err) = repo.save(&snapshot).await {
                tracing::warn!(error = %err, "failed to persist progress");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azkar_core::model::AzkarItem;
    use storage::repository::InMemoryRepository;

    /// Let scheduled persistence tasks run on the test runtime.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    async fn fresh_service(repo: &InMemoryRepository) -> ProgressService {
        ProgressService::initialize(Catalog::builtin(), Arc::new(repo.clone())).await
    }

    fn build_item(id: u32, initial: u32) -> AzkarItem {
        AzkarItem::new(ItemId::new(id), format!("ذكر {id}"), initial).unwrap()
    }

    fn leak_catalog(morning: Vec<AzkarItem>, evening: Vec<AzkarItem>) -> &'static Catalog {
        Box::leak(Box::new(Catalog::new(morning, evening).unwrap()))
    }

    #[tokio::test]
    async fn fresh_store_reads_initial_counts() {
        let repo = InMemoryRepository::new();
        let service = fresh_service(&repo).await;

        assert_eq!(service.get_remaining(ItemId::new(1)), 1);
        assert_eq!(service.get_remaining(ItemId::new(20)), 100);
        assert!(!service.is_completed(ItemId::new(20)));
    }

    #[tokio::test]
    async fn decrement_counts_down_to_completion_and_stays_there() {
        let repo = InMemoryRepository::new();
        let service = fresh_service(&repo).await;
        let id = ItemId::new(3); // initial 3

        assert_eq!(service.decrement(id), 2);
        assert_eq!(service.decrement(id), 1);
        assert_eq!(service.decrement(id), 0);
        assert!(service.is_completed(id));

        // Fourth recitation stays at zero.
        assert_eq!(service.decrement(id), 0);
        assert_eq!(service.get_remaining(id), 0);
    }

    #[tokio::test]
    async fn decrement_persists_the_full_map() {
        let repo = InMemoryRepository::new();
        let service = fresh_service(&repo).await;

        service.decrement(ItemId::new(3));
        service.decrement(ItemId::new(20));
        settle().await;

        let stored = repo.load().await.unwrap().expect("map persisted");
        assert_eq!(stored.get(ItemId::new(3)), Some(2));
        assert_eq!(stored.get(ItemId::new(20)), Some(99));
    }

    #[tokio::test]
    async fn noop_decrement_schedules_no_save() {
        let repo = InMemoryRepository::new();
        let service = fresh_service(&repo).await;
        let id = ItemId::new(1); // initial 1

        service.decrement(id);
        settle().await;
        let saves_after_completion = repo.save_count();
        assert_eq!(saves_after_completion, 1);

        service.decrement(id);
        settle().await;
        assert_eq!(repo.save_count(), saves_after_completion);
        assert_eq!(
            repo.load().await.unwrap().unwrap().get(id),
            Some(0),
            "persisted value unchanged"
        );
    }

    #[tokio::test]
    async fn category_progress_moves_as_items_complete() {
        let repo = InMemoryRepository::new();
        let service = fresh_service(&repo).await;

        assert_eq!(service.category_progress(Category::Morning), 0.0);
        assert_eq!(service.category_progress(Category::Evening), 0.0);

        service.decrement(ItemId::new(1)); // initial 1, now complete
        let expected = 1.0 / 26.0;
        assert!((service.category_progress(Category::Morning) - expected).abs() < f32::EPSILON);
        assert_eq!(service.category_progress(Category::Evening), 0.0);
    }

    #[tokio::test]
    async fn half_complete_category_reports_one_half() {
        let catalog = leak_catalog(vec![build_item(1, 2), build_item(2, 5)], Vec::new());
        let repo = InMemoryRepository::new();
        let service = ProgressService::initialize(catalog, Arc::new(repo)).await;

        service.decrement(ItemId::new(1));
        service.decrement(ItemId::new(1));

        assert!((service.category_progress(Category::Morning) - 0.5).abs() < f32::EPSILON);

        let view = service.progress_view(Category::Morning);
        assert_eq!(view.total, 2);
        assert_eq!(view.completed, 1);
        assert!(!view.is_complete());
    }

    #[tokio::test]
    async fn reset_clears_state_and_storage_once() {
        let repo = InMemoryRepository::new();
        let service = fresh_service(&repo).await;

        service.decrement(ItemId::new(1));
        service.decrement(ItemId::new(27));
        settle().await;

        service.reset();
        settle().await;

        assert_eq!(service.category_progress(Category::Morning), 0.0);
        assert_eq!(service.category_progress(Category::Evening), 0.0);
        assert_eq!(service.get_remaining(ItemId::new(1)), 1);
        assert_eq!(repo.load().await.unwrap(), None);
        assert_eq!(repo.clear_count(), 1);

        // Resetting an already-empty store schedules nothing.
        service.reset();
        settle().await;
        assert_eq!(repo.clear_count(), 1);
    }

    #[tokio::test]
    async fn failed_load_starts_fresh_and_stays_interactive() {
        let repo = InMemoryRepository::new();
        repo.set_failing(true);
        let service = fresh_service(&repo).await;

        assert_eq!(service.get_remaining(ItemId::new(3)), 3);

        repo.set_failing(false);
        assert_eq!(service.decrement(ItemId::new(3)), 2);
        settle().await;
        assert_eq!(
            repo.load().await.unwrap().unwrap().get(ItemId::new(3)),
            Some(2)
        );
    }

    #[tokio::test]
    async fn persistence_failure_keeps_in_memory_state_authoritative() {
        let repo = InMemoryRepository::new();
        let service = fresh_service(&repo).await;

        repo.set_failing(true);
        assert_eq!(service.decrement(ItemId::new(3)), 2);
        settle().await;

        assert_eq!(service.get_remaining(ItemId::new(3)), 2);
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn explicit_initial_entry_loads_like_an_absent_one() {
        let repo = InMemoryRepository::new();
        let mut seeded = ProgressMap::new();
        seeded.insert(ItemId::new(1), 1); // initial of item 1
        repo.save(&seeded).await.unwrap();

        let service = fresh_service(&repo).await;

        assert_eq!(service.get_remaining(ItemId::new(1)), 1);
        assert!(!service.is_completed(ItemId::new(1)));
        assert_eq!(service.category_progress(Category::Morning), 0.0);
    }

    #[tokio::test]
    async fn stale_stored_payload_is_clamped_on_load() {
        let repo = InMemoryRepository::new();
        let mut seeded = ProgressMap::new();
        seeded.insert(ItemId::new(3), 999);
        seeded.insert(ItemId::new(777), 5);
        repo.save(&seeded).await.unwrap();

        let service = fresh_service(&repo).await;

        assert_eq!(service.get_remaining(ItemId::new(3)), 3);
        let snapshot = service.snapshot();
        assert_eq!(snapshot.get(ItemId::new(3)), Some(3));
        assert_eq!(snapshot.get(ItemId::new(777)), None);
    }

    #[tokio::test]
    #[should_panic(expected = "unknown item id")]
    async fn unknown_id_is_a_caller_error() {
        let repo = InMemoryRepository::new();
        let service = fresh_service(&repo).await;
        let _ = service.get_remaining(ItemId::new(999));
    }
}
