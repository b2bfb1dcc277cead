//! ModelGateway trait definition and the fixed prompt material.
//!
//! The gateway is the single seam to the external generative model. Core
//! code builds a [`ModelInvocation`] (persona + task prompt + optional
//! staged attachment) and gets back the model's free text; all transport
//! concerns live behind the trait in sada-infra.

use sada_types::analysis::AnalysisType;
use sada_types::error::ModelError;
use uuid::Uuid;

use crate::attachment::StagedAttachment;

/// System persona for the document-analysis use case.
pub const DOCUMENT_ANALYST_PERSONA: &str = "You are SaDA AI, an expert document analyzer. \
Analyze documents thoroughly and provide detailed insights, summaries, and extract key \
information. Always provide structured responses with clear summaries, key insights, and \
identify any entities or important data points.";

/// System persona for the customer-support chat use case.
pub const CUSTOMER_SUPPORT_PERSONA: &str = "You are SaDA AI, an advanced customer support \
assistant. You can analyze text, images, audio, and video content. Provide helpful, detailed \
responses and assist with customer inquiries. For product defects or technical issues, analyze \
any provided media and offer solutions.";

/// Fixed task prompt for each analysis intent.
pub fn analysis_prompt(analysis_type: AnalysisType) -> &'static str {
    match analysis_type {
        AnalysisType::Summary => {
            "Provide a comprehensive summary of this document. Extract the main points and key \
             information."
        }
        AnalysisType::Insights => {
            "Analyze this document and provide detailed insights. What are the key themes, \
             important data points, and actionable information?"
        }
        AnalysisType::Entities => {
            "Extract all named entities from this document including people, organizations, \
             locations, dates, and other important entities. Format as JSON."
        }
        AnalysisType::Sentiment => {
            "Analyze the sentiment and tone of this document. Provide a sentiment score between \
             -1 (negative) and 1 (positive)."
        }
    }
}

/// One external model invocation.
///
/// `session_id` tags the invocation for continuity and tracing; the
/// external API itself is stateless. The staged attachment, when present,
/// is consumed by the invocation.
#[derive(Debug)]
pub struct ModelInvocation {
    pub session_id: Uuid,
    pub system: String,
    pub prompt: String,
    pub attachment: Option<StagedAttachment>,
}

/// Trait for the external generative model backend.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in sada-infra (e.g., `GeminiProvider`).
pub trait ModelGateway: Send + Sync {
    /// Send one invocation and return the model's raw text response.
    fn generate(
        &self,
        invocation: ModelInvocation,
    ) -> impl std::future::Future<Output = Result<String, ModelError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_is_total() {
        for ty in [
            AnalysisType::Summary,
            AnalysisType::Insights,
            AnalysisType::Entities,
            AnalysisType::Sentiment,
        ] {
            assert!(!analysis_prompt(ty).is_empty());
        }
    }

    #[test]
    fn test_entities_prompt_requests_json() {
        assert!(analysis_prompt(AnalysisType::Entities).contains("JSON"));
    }

    #[test]
    fn test_sentiment_prompt_names_score_range() {
        let prompt = analysis_prompt(AnalysisType::Sentiment);
        assert!(prompt.contains("-1"));
        assert!(prompt.contains("1 (positive)"));
    }
}
