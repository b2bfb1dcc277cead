//! Base64 attachment codec.
//!
//! Implements [`AttachmentCodec`] with the standard base64 alphabet.
//! Staging materializes the decoded bytes as an in-process
//! [`StagedAttachment`] buffer for one model invocation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use sada_core::attachment::{AttachmentCodec, StagedAttachment};
use sada_types::error::AttachmentError;

/// Standard-alphabet base64 codec with in-memory staging.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl AttachmentCodec for Base64Codec {
    fn encode(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, AttachmentError> {
        STANDARD
            .decode(text)
            .map_err(|e| AttachmentError::Decode(e.to_string()))
    }

    fn stage(&self, bytes: Vec<u8>, mime_type: &str) -> Result<StagedAttachment, AttachmentError> {
        Ok(StagedAttachment::new(bytes, mime_type))
    }
}
