//! Document analysis record types for SaDA.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Which fixed prompt template an analysis request selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Summary,
    Insights,
    Entities,
    Sentiment,
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisType::Summary => write!(f, "summary"),
            AnalysisType::Insights => write!(f, "insights"),
            AnalysisType::Entities => write!(f, "entities"),
            AnalysisType::Sentiment => write!(f, "sentiment"),
        }
    }
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(AnalysisType::Summary),
            "insights" => Ok(AnalysisType::Insights),
            "entities" => Ok(AnalysisType::Entities),
            "sentiment" => Ok(AnalysisType::Sentiment),
            other => Err(format!("invalid analysis type: '{other}'")),
        }
    }
}

/// The stored result of analyzing one uploaded document.
///
/// Immutable after creation. `file_content` keeps the original base64
/// payload verbatim so the document can be re-downloaded or re-analyzed.
/// `entities` is requested of the model but never parsed back into
/// structured form, so it is always empty here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub analysis_type: AnalysisType,
    /// First 500 characters of the model response.
    pub summary: String,
    /// At most 5 response lines whose trimmed length exceeds 10 characters.
    pub key_insights: Vec<String>,
    /// Present only for sentiment analyses; one of -0.7, 0.0, or 0.7.
    pub sentiment_score: Option<f64>,
    pub entities: Vec<serde_json::Value>,
    /// Base64-encoded document bytes, exactly as received.
    pub file_content: String,
    pub session_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Request payload for analyzing a document.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDocumentAnalysis {
    pub filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub analysis_type: AnalysisType,
    /// Base64-encoded document bytes.
    pub file_content: String,
    pub session_id: Uuid,
}
