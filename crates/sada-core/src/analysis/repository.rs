//! AnalysisRepository trait definition.

use sada_types::analysis::DocumentAnalysis;
use sada_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for document analysis persistence.
///
/// Analyses are insert-only; there are no updates or deletes.
/// Implementations live in sada-infra (e.g., `SqliteAnalysisRepository`).
pub trait AnalysisRepository: Send + Sync {
    /// Persist a new analysis record.
    fn insert(
        &self,
        analysis: &DocumentAnalysis,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List analyses ordered by `timestamp` DESC, capped at `limit`.
    fn list(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<DocumentAnalysis>, RepositoryError>> + Send;

    /// List one session's analyses ordered by `timestamp` DESC, capped at `limit`.
    fn list_for_session(
        &self,
        session_id: &Uuid,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<DocumentAnalysis>, RepositoryError>> + Send;
}
