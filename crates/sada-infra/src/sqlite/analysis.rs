//! SQLite document-analysis repository implementation.
//!
//! `key_insights` and `entities` are stored as JSON text columns; the
//! rest follows the same Row-struct mapping as the chat repository.

use sada_core::analysis::repository::AnalysisRepository;
use sada_types::analysis::{AnalysisType, DocumentAnalysis};
use sada_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::chat::parse_datetime;
use super::pool::DatabasePool;

/// SQLite-backed implementation of `AnalysisRepository`.
pub struct SqliteAnalysisRepository {
    pool: DatabasePool,
}

impl SqliteAnalysisRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct AnalysisRow {
    id: String,
    filename: String,
    content_type: String,
    file_size: i64,
    analysis_type: String,
    summary: String,
    key_insights: String,
    sentiment_score: Option<f64>,
    entities: String,
    file_content: String,
    session_id: String,
    timestamp: String,
}

impl AnalysisRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            filename: row.try_get("filename")?,
            content_type: row.try_get("content_type")?,
            file_size: row.try_get("file_size")?,
            analysis_type: row.try_get("analysis_type")?,
            summary: row.try_get("summary")?,
            key_insights: row.try_get("key_insights")?,
            sentiment_score: row.try_get("sentiment_score")?,
            entities: row.try_get("entities")?,
            file_content: row.try_get("file_content")?,
            session_id: row.try_get("session_id")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_analysis(self) -> Result<DocumentAnalysis, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid analysis id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let analysis_type: AnalysisType = self
            .analysis_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let key_insights: Vec<String> = serde_json::from_str(&self.key_insights)
            .map_err(|e| RepositoryError::Query(format!("invalid key_insights: {e}")))?;
        let entities: Vec<serde_json::Value> = serde_json::from_str(&self.entities)
            .map_err(|e| RepositoryError::Query(format!("invalid entities: {e}")))?;

        Ok(DocumentAnalysis {
            id,
            filename: self.filename,
            content_type: self.content_type,
            file_size: self.file_size,
            analysis_type,
            summary: self.summary,
            key_insights,
            sentiment_score: self.sentiment_score,
            entities,
            file_content: self.file_content,
            session_id,
            timestamp: parse_datetime(&self.timestamp)?,
        })
    }
}

impl AnalysisRepository for SqliteAnalysisRepository {
    async fn insert(&self, analysis: &DocumentAnalysis) -> Result<(), RepositoryError> {
        let key_insights = serde_json::to_string(&analysis.key_insights)
            .map_err(|e| RepositoryError::Query(format!("serialize key_insights: {e}")))?;
        let entities = serde_json::to_string(&analysis.entities)
            .map_err(|e| RepositoryError::Query(format!("serialize entities: {e}")))?;

        sqlx::query(
            r#"INSERT INTO document_analyses (id, filename, content_type, file_size, analysis_type, summary, key_insights, sentiment_score, entities, file_content, session_id, timestamp)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(analysis.id.to_string())
        .bind(&analysis.filename)
        .bind(&analysis.content_type)
        .bind(analysis.file_size)
        .bind(analysis.analysis_type.to_string())
        .bind(&analysis.summary)
        .bind(key_insights)
        .bind(analysis.sentiment_score)
        .bind(entities)
        .bind(&analysis.file_content)
        .bind(analysis.session_id.to_string())
        .bind(analysis.timestamp.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<DocumentAnalysis>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM document_analyses ORDER BY timestamp DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut analyses = Vec::with_capacity(rows.len());
        for row in &rows {
            let analysis_row =
                AnalysisRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            analyses.push(analysis_row.into_analysis()?);
        }

        Ok(analyses)
    }

    async fn list_for_session(
        &self,
        session_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<DocumentAnalysis>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM document_analyses WHERE session_id = ? ORDER BY timestamp DESC LIMIT ?",
        )
        .bind(session_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut analyses = Vec::with_capacity(rows.len());
        for row in &rows {
            let analysis_row =
                AnalysisRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            analyses.push(analysis_row.into_analysis()?);
        }

        Ok(analyses)
    }
}
