//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;

/// Errors emitted while bootstrapping app services.
///
/// The progress store itself never fails: load problems degrade to a fresh
/// session and persistence problems degrade to in-memory-only operation.
/// Only opening the storage backend can abort startup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
