//! Analysis service orchestrating the document analysis flow.
//!
//! One call runs the whole pipeline: decode the transport payload, stage
//! it, invoke the model with the intent's fixed prompt, normalize the
//! response, and persist the finished record. Nothing is written until
//! every derived field exists, so a failure anywhere leaves no partial
//! state behind.

use chrono::Utc;
use sada_types::analysis::{DocumentAnalysis, NewDocumentAnalysis};
use sada_types::error::AnalysisError;
use tracing::info;
use uuid::Uuid;

use crate::analysis::normalize::normalize_response;
use crate::analysis::repository::AnalysisRepository;
use crate::attachment::AttachmentCodec;
use crate::chat::repository::ChatRepository;
use crate::model::{DOCUMENT_ANALYST_PERSONA, ModelGateway, ModelInvocation, analysis_prompt};

/// Fixed page size for analysis listings.
pub const ANALYSIS_PAGE_LIMIT: i64 = 100;

/// Orchestrates document analysis requests.
///
/// The chat repository is only consulted for the optional session
/// referential check; analyses themselves live in their own store.
pub struct AnalysisService<A, R, G, C>
where
    A: AnalysisRepository,
    R: ChatRepository,
    G: ModelGateway,
    C: AttachmentCodec,
{
    analyses: A,
    sessions: R,
    gateway: G,
    codec: C,
    enforce_session_refs: bool,
}

impl<A, R, G, C> AnalysisService<A, R, G, C>
where
    A: AnalysisRepository,
    R: ChatRepository,
    G: ModelGateway,
    C: AttachmentCodec,
{
    pub fn new(
        analyses: A,
        sessions: R,
        gateway: G,
        codec: C,
        enforce_session_refs: bool,
    ) -> Self {
        Self {
            analyses,
            sessions,
            gateway,
            codec,
            enforce_session_refs,
        }
    }

    /// Analyze one document and persist the result.
    ///
    /// Unlike the chat path, attachment failures here are fatal: a payload
    /// that cannot be decoded aborts the request before the model is ever
    /// invoked.
    pub async fn analyze_document(
        &self,
        request: NewDocumentAnalysis,
    ) -> Result<DocumentAnalysis, AnalysisError> {
        if self.enforce_session_refs {
            self.sessions
                .get_session(&request.session_id)
                .await?
                .ok_or(AnalysisError::SessionNotFound)?;
        }

        let bytes = self.codec.decode(&request.file_content)?;
        let staged = self.codec.stage(bytes, &request.content_type)?;

        let invocation = ModelInvocation {
            session_id: request.session_id,
            system: DOCUMENT_ANALYST_PERSONA.to_string(),
            prompt: analysis_prompt(request.analysis_type).to_string(),
            attachment: Some(staged),
        };
        let response = self.gateway.generate(invocation).await?;

        let normalized = normalize_response(&response, request.analysis_type);

        let analysis = DocumentAnalysis {
            id: Uuid::now_v7(),
            filename: request.filename,
            content_type: request.content_type,
            file_size: request.file_size,
            analysis_type: request.analysis_type,
            summary: normalized.summary,
            key_insights: normalized.key_insights,
            sentiment_score: normalized.sentiment_score,
            entities: Vec::new(),
            file_content: request.file_content,
            session_id: request.session_id,
            timestamp: Utc::now(),
        };

        self.analyses.insert(&analysis).await?;
        info!(
            analysis_id = %analysis.id,
            session_id = %analysis.session_id,
            analysis_type = %analysis.analysis_type,
            "document analysis stored"
        );
        Ok(analysis)
    }

    /// List analyses across all sessions, most recent first.
    pub async fn list_analyses(&self) -> Result<Vec<DocumentAnalysis>, AnalysisError> {
        Ok(self.analyses.list(ANALYSIS_PAGE_LIMIT).await?)
    }

    /// List one session's analyses, most recent first.
    pub async fn list_session_analyses(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<DocumentAnalysis>, AnalysisError> {
        Ok(self
            .analyses
            .list_for_session(session_id, ANALYSIS_PAGE_LIMIT)
            .await?)
    }
}
