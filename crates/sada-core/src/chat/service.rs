//! Chat service orchestrating session lifecycle and message turns.
//!
//! ChatService coordinates the ChatRepository, the ModelGateway, and the
//! AttachmentCodec for the full conversation lifecycle: creating sessions,
//! running chat turns through the model, persisting the resulting message,
//! and touching session recency.

use chrono::Utc;
use sada_types::chat::{ChatMessage, ChatSession, NewChatMessage, NewChatSession};
use sada_types::error::ChatError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::attachment::{AttachmentCodec, StagedAttachment};
use crate::chat::repository::ChatRepository;
use crate::model::{CUSTOMER_SUPPORT_PERSONA, ModelGateway, ModelInvocation};

/// Fixed page size for session listings.
pub const SESSION_PAGE_LIMIT: i64 = 100;

/// Fixed page size for message listings.
pub const MESSAGE_PAGE_LIMIT: i64 = 1000;

/// Orchestrates chat sessions and message turns.
///
/// Generic over `ChatRepository`, `ModelGateway`, and `AttachmentCodec` to
/// maintain clean architecture (sada-core never depends on sada-infra).
pub struct ChatService<R: ChatRepository, G: ModelGateway, C: AttachmentCodec> {
    repo: R,
    gateway: G,
    codec: C,
    enforce_session_refs: bool,
}

impl<R: ChatRepository, G: ModelGateway, C: AttachmentCodec> ChatService<R, G, C> {
    /// Create a new chat service.
    ///
    /// `enforce_session_refs` rejects message writes whose session id does
    /// not resolve; by default orphaned references are tolerated.
    pub fn new(repo: R, gateway: G, codec: C, enforce_session_refs: bool) -> Self {
        Self {
            repo,
            gateway,
            codec,
            enforce_session_refs,
        }
    }

    // --- Session lifecycle ---

    /// Create a new chat session.
    ///
    /// Assigns the id and timestamps (`created_at == updated_at`) and
    /// persists the session. Session names are not unique.
    pub async fn create_session(&self, input: NewChatSession) -> Result<ChatSession, ChatError> {
        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::now_v7(),
            session_name: input.session_name,
            session_type: input.session_type,
            created_at: now,
            updated_at: now,
        };

        self.repo.create_session(&session).await?;
        info!(session_id = %session.id, session_type = %session.session_type, "chat session created");
        Ok(session)
    }

    /// List sessions, most recently updated first.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.repo.list_sessions(SESSION_PAGE_LIMIT).await?)
    }

    /// Get a session by id, failing if it does not exist.
    pub async fn get_session(&self, session_id: &Uuid) -> Result<ChatSession, ChatError> {
        self.repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)
    }

    // --- Message turns ---

    /// Run one chat turn: invoke the model and persist the exchange.
    ///
    /// An attachment that fails to decode or stage degrades the turn to
    /// text-only rather than failing it. After the message is written the
    /// session's `updated_at` advances to the current time; the write goes
    /// through even when the session id resolves to nothing.
    pub async fn post_message(&self, input: NewChatMessage) -> Result<ChatMessage, ChatError> {
        if self.enforce_session_refs {
            self.repo
                .get_session(&input.session_id)
                .await?
                .ok_or(ChatError::SessionNotFound)?;
        }

        let attachment = self.stage_chat_attachment(&input);

        let invocation = ModelInvocation {
            session_id: input.session_id,
            system: CUSTOMER_SUPPORT_PERSONA.to_string(),
            prompt: input.user_message.clone(),
            attachment,
        };
        let ai_response = self.gateway.generate(invocation).await?;

        let message = ChatMessage {
            id: Uuid::now_v7(),
            session_id: input.session_id,
            user_message: input.user_message,
            ai_response,
            message_type: input.message_type,
            file_content: input.file_content,
            file_type: input.file_type,
            timestamp: Utc::now(),
        };

        self.repo.save_message(&message).await?;
        self.repo
            .touch_session(&message.session_id, Utc::now())
            .await?;

        Ok(message)
    }

    /// List a session's messages in chronological order.
    pub async fn list_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self
            .repo
            .list_messages(session_id, MESSAGE_PAGE_LIMIT)
            .await?)
    }

    /// Decode and stage the turn's attachment, degrading to text-only on
    /// failure. Requires both the payload and its MIME type.
    fn stage_chat_attachment(&self, input: &NewChatMessage) -> Option<StagedAttachment> {
        let (content, mime) = match (&input.file_content, &input.file_type) {
            (Some(content), Some(mime)) => (content, mime),
            _ => return None,
        };

        match self
            .codec
            .decode(content)
            .and_then(|bytes| self.codec.stage(bytes, mime))
        {
            Ok(staged) => Some(staged),
            Err(err) => {
                warn!(session_id = %input.session_id, error = %err, "attachment rejected, continuing text-only");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sada_types::chat::{MessageType, SessionType};
    use sada_types::error::{AttachmentError, ModelError, RepositoryError};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryChatRepo {
        sessions: Mutex<Vec<ChatSession>>,
        messages: Mutex<Vec<ChatMessage>>,
    }

    impl ChatRepository for MemoryChatRepo {
        async fn create_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
            self.sessions.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn get_session(
            &self,
            session_id: &Uuid,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == *session_id)
                .cloned())
        }

        async fn list_sessions(&self, limit: i64) -> Result<Vec<ChatSession>, RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap().clone();
            sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            sessions.truncate(limit as usize);
            Ok(sessions)
        }

        async fn touch_session(
            &self,
            session_id: &Uuid,
            updated_at: chrono::DateTime<Utc>,
        ) -> Result<(), RepositoryError> {
            if let Some(session) = self
                .sessions
                .lock()
                .unwrap()
                .iter_mut()
                .find(|s| s.id == *session_id)
            {
                session.updated_at = updated_at;
            }
            Ok(())
        }

        async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn list_messages(
            &self,
            session_id: &Uuid,
            limit: i64,
        ) -> Result<Vec<ChatMessage>, RepositoryError> {
            let mut messages: Vec<_> = self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.session_id == *session_id)
                .cloned()
                .collect();
            messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            messages.truncate(limit as usize);
            Ok(messages)
        }
    }

    /// Gateway that replies with a fixed string and records whether the
    /// invocation carried an attachment.
    struct StubGateway {
        reply: String,
        saw_attachment: Mutex<Option<bool>>,
    }

    impl StubGateway {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                saw_attachment: Mutex::new(None),
            }
        }
    }

    impl ModelGateway for StubGateway {
        async fn generate(&self, invocation: ModelInvocation) -> Result<String, ModelError> {
            *self.saw_attachment.lock().unwrap() = Some(invocation.attachment.is_some());
            Ok(self.reply.clone())
        }
    }

    struct FailingGateway;

    impl ModelGateway for FailingGateway {
        async fn generate(&self, _invocation: ModelInvocation) -> Result<String, ModelError> {
            Err(ModelError::Provider {
                message: "boom".to_string(),
            })
        }
    }

    /// Codec whose decode fails on the marker string `"!corrupt!"`.
    struct StubCodec;

    impl AttachmentCodec for StubCodec {
        fn encode(&self, bytes: &[u8]) -> String {
            String::from_utf8_lossy(bytes).into_owned()
        }

        fn decode(&self, text: &str) -> Result<Vec<u8>, AttachmentError> {
            if text == "!corrupt!" {
                Err(AttachmentError::Decode("invalid symbol".to_string()))
            } else {
                Ok(text.as_bytes().to_vec())
            }
        }

        fn stage(
            &self,
            bytes: Vec<u8>,
            mime_type: &str,
        ) -> Result<StagedAttachment, AttachmentError> {
            Ok(StagedAttachment::new(bytes, mime_type))
        }
    }

    fn service(
        gateway: StubGateway,
    ) -> ChatService<MemoryChatRepo, StubGateway, StubCodec> {
        ChatService::new(MemoryChatRepo::default(), gateway, StubCodec, false)
    }

    fn new_session(name: &str) -> NewChatSession {
        NewChatSession {
            session_name: name.to_string(),
            session_type: SessionType::CustomerSupport,
        }
    }

    fn text_message(session_id: Uuid, text: &str) -> NewChatMessage {
        NewChatMessage {
            session_id,
            user_message: text.to_string(),
            message_type: MessageType::Text,
            file_content: None,
            file_type: None,
        }
    }

    #[tokio::test]
    async fn test_create_session_ids_unique_and_timestamps_equal() {
        let svc = service(StubGateway::new("ok"));

        let a = svc.create_session(new_session("T1")).await.unwrap();
        let b = svc.create_session(new_session("T1")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.session_type, SessionType::CustomerSupport);
    }

    #[tokio::test]
    async fn test_get_session_unknown_id_is_not_found() {
        let svc = service(StubGateway::new("ok"));
        let err = svc.get_session(&Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_post_message_persists_and_advances_updated_at() {
        let svc = service(StubGateway::new("Hi! How can I help?"));
        let session = svc.create_session(new_session("support")).await.unwrap();
        let before = session.updated_at;

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let message = svc
            .post_message(text_message(session.id, "hello"))
            .await
            .unwrap();

        assert_eq!(message.ai_response, "Hi! How can I help?");
        assert!(!message.ai_response.is_empty());

        let listed = svc.list_messages(&session.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, message.id);

        let refreshed = svc.get_session(&session.id).await.unwrap();
        assert!(refreshed.updated_at > before);
    }

    #[tokio::test]
    async fn test_post_message_tolerates_unknown_session() {
        let svc = service(StubGateway::new("ok"));
        let orphan_session = Uuid::now_v7();

        let message = svc
            .post_message(text_message(orphan_session, "anyone there?"))
            .await
            .unwrap();

        assert_eq!(message.session_id, orphan_session);
        let listed = svc.list_messages(&orphan_session).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_post_message_enforced_refs_reject_unknown_session() {
        let svc = ChatService::new(
            MemoryChatRepo::default(),
            StubGateway::new("ok"),
            StubCodec,
            true,
        );

        let err = svc
            .post_message(text_message(Uuid::now_v7(), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));

        assert!(svc.list_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_attachment_degrades_to_text_only() {
        let gateway = StubGateway::new("I could not see the image, but here is my answer.");
        let svc = service(gateway);
        let session = svc.create_session(new_session("support")).await.unwrap();

        let message = svc
            .post_message(NewChatMessage {
                session_id: session.id,
                user_message: "what is wrong with this photo?".to_string(),
                message_type: MessageType::Image,
                file_content: Some("!corrupt!".to_string()),
                file_type: Some("image/png".to_string()),
            })
            .await
            .unwrap();

        assert!(!message.ai_response.is_empty());
        // The corrupt payload is still echoed back into the stored record.
        assert_eq!(message.file_content.as_deref(), Some("!corrupt!"));
        assert_eq!(*svc.gateway.saw_attachment.lock().unwrap(), Some(false));
    }

    #[tokio::test]
    async fn test_valid_attachment_reaches_gateway() {
        let gateway = StubGateway::new("Nice photo.");
        let svc = service(gateway);
        let session = svc.create_session(new_session("support")).await.unwrap();

        svc.post_message(NewChatMessage {
            session_id: session.id,
            user_message: "see attached".to_string(),
            message_type: MessageType::Image,
            file_content: Some("payload".to_string()),
            file_type: Some("image/jpeg".to_string()),
        })
        .await
        .unwrap();

        assert_eq!(*svc.gateway.saw_attachment.lock().unwrap(), Some(true));
    }

    #[tokio::test]
    async fn test_attachment_without_mime_is_ignored() {
        let gateway = StubGateway::new("ok");
        let svc = service(gateway);
        let session = svc.create_session(new_session("support")).await.unwrap();

        svc.post_message(NewChatMessage {
            session_id: session.id,
            user_message: "hi".to_string(),
            message_type: MessageType::File,
            file_content: Some("payload".to_string()),
            file_type: None,
        })
        .await
        .unwrap();

        assert_eq!(*svc.gateway.saw_attachment.lock().unwrap(), Some(false));
    }

    #[tokio::test]
    async fn test_model_failure_persists_nothing() {
        let svc = ChatService::new(
            MemoryChatRepo::default(),
            FailingGateway,
            StubCodec,
            false,
        );
        let session = svc.create_session(new_session("support")).await.unwrap();
        let before = svc.get_session(&session.id).await.unwrap().updated_at;

        let err = svc
            .post_message(text_message(session.id, "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Model(_)));

        assert!(svc.list_messages(&session.id).await.unwrap().is_empty());
        assert_eq!(svc.get_session(&session.id).await.unwrap().updated_at, before);
    }

    #[tokio::test]
    async fn test_list_sessions_most_recent_first() {
        let svc = service(StubGateway::new("ok"));

        let first = svc.create_session(new_session("a")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = svc.create_session(new_session("b")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        // Posting to the oldest session bumps it to the front.
        svc.post_message(text_message(first.id, "bump")).await.unwrap();

        let listed = svc.list_sessions().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
        assert!(listed[0].updated_at > listed[1].updated_at);
    }
}
