use thiserror::Error;

/// Errors from repository operations (used by trait definitions in sada-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from attachment decoding and staging.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("invalid base64 payload: {0}")]
    Decode(String),

    #[error("failed to stage attachment: {0}")]
    Stage(String),
}

/// Errors from external model invocations.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("model call timed out after {0}ms")]
    Timeout(u64),

    #[error("model returned no usable content: {0}")]
    Blocked(String),
}

/// Errors from the chat session/message orchestrator.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("session not found")]
    SessionNotFound,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from the document analysis orchestrator.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("session not found")]
    SessionNotFound,

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_attachment_error_display() {
        let err = AttachmentError::Decode("invalid symbol at 3".to_string());
        assert!(err.to_string().contains("invalid symbol at 3"));
    }

    #[test]
    fn test_model_error_timeout_display() {
        let err = ModelError::Timeout(120_000);
        assert!(err.to_string().contains("120000"));
    }

    #[test]
    fn test_chat_error_wraps_model_error() {
        let err = ChatError::from(ModelError::AuthenticationFailed);
        assert_eq!(err.to_string(), "authentication failed");
    }

    #[test]
    fn test_analysis_error_wraps_attachment_error() {
        let err = AnalysisError::from(AttachmentError::Decode("truncated".to_string()));
        assert!(err.to_string().contains("truncated"));
    }
}
