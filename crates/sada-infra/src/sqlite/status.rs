//! SQLite status-check repository implementation.

use sada_core::status::StatusRepository;
use sada_types::error::RepositoryError;
use sada_types::status::StatusCheck;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `StatusRepository`.
pub struct SqliteStatusRepository {
    pool: DatabasePool,
}

impl SqliteStatusRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl StatusRepository for SqliteStatusRepository {
    async fn insert(&self, check: &StatusCheck) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO status_checks (id, client_name, timestamp) VALUES (?, ?, ?)")
            .bind(check.id.to_string())
            .bind(&check.client_name)
            .bind(check.timestamp.to_rfc3339())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<StatusCheck>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM status_checks ORDER BY timestamp DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut checks = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let client_name: String = row
                .try_get("client_name")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let timestamp: String = row
                .try_get("timestamp")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

            checks.push(StatusCheck {
                id: Uuid::parse_str(&id)
                    .map_err(|e| RepositoryError::Query(format!("invalid id: {e}")))?,
                client_name,
                timestamp: super::chat::parse_datetime(&timestamp)?,
            });
        }

        Ok(checks)
    }
}
