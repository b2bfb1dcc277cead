//! Attachment codec trait and the staged-attachment handle.
//!
//! Attachments arrive over the wire as base64 text. The codec converts
//! between that transport encoding and raw bytes, and "stages" decoded
//! bytes into a [`StagedAttachment`] handle the model gateway consumes
//! exactly once. Staging is an in-process byte buffer -- no scratch files.

use sada_types::error::AttachmentError;

/// A transient byte buffer handed to the model gateway for one invocation.
///
/// The buffer is consumed by [`StagedAttachment::into_bytes`]; releasing
/// an unconsumed handle is just a drop.
#[derive(Debug, Clone)]
pub struct StagedAttachment {
    mime_type: String,
    bytes: Vec<u8>,
}

impl StagedAttachment {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the handle, yielding the staged bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        tracing::debug!(size = self.bytes.len(), mime = %self.mime_type, "staged attachment consumed");
        self.bytes
    }
}

/// Converts between raw bytes and the transport-safe text encoding, and
/// stages decoded bytes for the model gateway.
///
/// Implementations live in sada-infra (e.g., `Base64Codec`).
pub trait AttachmentCodec: Send + Sync {
    /// Encode raw bytes into transport text.
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decode transport text back into raw bytes.
    ///
    /// Malformed input fails with [`AttachmentError::Decode`].
    fn decode(&self, text: &str) -> Result<Vec<u8>, AttachmentError>;

    /// Stage decoded bytes for a single model invocation.
    fn stage(&self, bytes: Vec<u8>, mime_type: &str) -> Result<StagedAttachment, AttachmentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_attachment_consumed_once() {
        let staged = StagedAttachment::new(vec![1, 2, 3], "image/png");
        assert_eq!(staged.mime_type(), "image/png");
        assert_eq!(staged.len(), 3);
        assert_eq!(staged.into_bytes(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_attachment() {
        let staged = StagedAttachment::new(Vec::new(), "application/octet-stream");
        assert!(staged.is_empty());
        assert!(staged.into_bytes().is_empty());
    }
}
