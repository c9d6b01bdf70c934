//! Error types for share link decoding.

use thiserror::Error;

/// Decoding stage at which a share link was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    /// URL shape or token lookup.
    Url,
    /// Base58 token text.
    Base58,
    /// Versioned payload bytes.
    Payload,
}

impl ErrorStage {
    /// Returns the stage label used in error messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorStage::Url => "url",
            ErrorStage::Base58 => "base58",
            ErrorStage::Payload => "payload",
        }
    }
}

/// Error while turning a share link back into a phrase.
///
/// These never cross the public [`phrase_from_url`](crate::phrase_from_url)
/// boundary, which reports presence or absence only. They are exposed for
/// tests and diagnostics through the `try_` entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === URL ===
    #[error("[url] not a recognized share link")]
    UnsupportedUrl,

    #[error("[url] share link carries no token")]
    TokenAbsent,

    // === Base58 ===
    #[error("[base58] invalid character {ch:?} at position {index}")]
    InvalidCharacter { ch: char, index: usize },

    // === Payload ===
    #[error("[payload] payload is empty")]
    EmptyPayload,

    #[error("[payload] unknown payload version: {version:#04x}")]
    UnknownVersion { version: u8 },

    #[error("[payload] deflate decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("[payload] phrase is not valid UTF-8")]
    InvalidUtf8,
}

impl DecodeError {
    /// Returns the stage this error belongs to.
    pub fn stage(&self) -> ErrorStage {
        match self {
            DecodeError::UnsupportedUrl | DecodeError::TokenAbsent => ErrorStage::Url,
            DecodeError::InvalidCharacter { .. } => ErrorStage::Base58,
            _ => ErrorStage::Payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping() {
        assert_eq!(DecodeError::UnsupportedUrl.stage(), ErrorStage::Url);
        assert_eq!(DecodeError::TokenAbsent.stage(), ErrorStage::Url);
        assert_eq!(
            DecodeError::InvalidCharacter { ch: '0', index: 3 }.stage(),
            ErrorStage::Base58
        );
        assert_eq!(DecodeError::EmptyPayload.stage(), ErrorStage::Payload);
        assert_eq!(
            DecodeError::UnknownVersion { version: 3 }.stage(),
            ErrorStage::Payload
        );
        assert_eq!(DecodeError::InvalidUtf8.stage(), ErrorStage::Payload);
    }

    #[test]
    fn test_message_prefix_matches_stage() {
        let errors = [
            DecodeError::UnsupportedUrl,
            DecodeError::InvalidCharacter { ch: 'l', index: 0 },
            DecodeError::DecompressionFailed("corrupt deflate stream".to_string()),
        ];
        for err in errors {
            let prefix = format!("[{}]", err.stage().label());
            assert!(err.to_string().starts_with(&prefix), "{}", err);
        }
    }

    #[test]
    fn test_unknown_version_message() {
        let err = DecodeError::UnknownVersion { version: 3 };
        assert_eq!(err.to_string(), "[payload] unknown payload version: 0x03");
    }
}
