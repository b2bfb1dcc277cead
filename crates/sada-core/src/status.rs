//! StatusRepository trait definition.

use sada_types::error::RepositoryError;
use sada_types::status::StatusCheck;

/// Repository trait for status-check persistence.
///
/// Implementations live in sada-infra (e.g., `SqliteStatusRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait StatusRepository: Send + Sync {
    /// Insert a new status check.
    fn insert(
        &self,
        check: &StatusCheck,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List status checks, newest first, capped at `limit`.
    fn list(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<StatusCheck>, RepositoryError>> + Send;
}
