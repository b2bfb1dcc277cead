//! Chat session and message types for SaDA.
//!
//! Sessions group a conversation; messages record one user/assistant
//! exchange each and are immutable once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// What kind of conversation a session holds.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (session_type IN ('document_analysis', 'customer_support'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    DocumentAnalysis,
    CustomerSupport,
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionType::DocumentAnalysis => write!(f, "document_analysis"),
            SessionType::CustomerSupport => write!(f, "customer_support"),
        }
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "document_analysis" => Ok(SessionType::DocumentAnalysis),
            "customer_support" => Ok(SessionType::CustomerSupport),
            other => Err(format!("invalid session type: '{other}'")),
        }
    }
}

/// Modality of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    Audio,
    Video,
    File,
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Text
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Text => write!(f, "text"),
            MessageType::Image => write!(f, "image"),
            MessageType::Audio => write!(f, "audio"),
            MessageType::Video => write!(f, "video"),
            MessageType::File => write!(f, "file"),
        }
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MessageType::Text),
            "image" => Ok(MessageType::Image),
            "audio" => Ok(MessageType::Audio),
            "video" => Ok(MessageType::Video),
            "file" => Ok(MessageType::File),
            other => Err(format!("invalid message type: '{other}'")),
        }
    }
}

/// A named, typed conversation container.
///
/// `updated_at` advances every time a message is appended; sessions are
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub session_name: String,
    pub session_type: SessionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One chat turn: the user's message and the model's reply.
///
/// The original transport-encoded attachment (if any) is stored verbatim
/// alongside its MIME type. Display order is `timestamp` ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_message: String,
    pub ai_response: String,
    pub message_type: MessageType,
    /// Base64-encoded attachment bytes, exactly as received.
    pub file_content: Option<String>,
    /// MIME type of the attachment.
    pub file_type: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Request payload for creating a session.
#[derive(Debug, Clone, Deserialize)]
pub struct NewChatSession {
    pub session_name: String,
    pub session_type: SessionType,
}

/// Request payload for posting a chat turn.
#[derive(Debug, Clone, Deserialize)]
pub struct NewChatMessage {
    pub session_id: Uuid,
    pub user_message: String,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub file_content: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
}
