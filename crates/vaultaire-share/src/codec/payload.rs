//! Versioned payload wrapping a phrase.
//!
//! Wire format:
//!
//! ```text
//! [version: u8] [content: ..]
//! 0x01  content = UTF-8 bytes of the phrase
//! 0x02  content = raw DEFLATE of the UTF-8 bytes
//! ```
//!
//! There is no length prefix; the content runs to the end of the payload.

use crate::codec::deflate::{Compressor, Deflate};
use crate::error::DecodeError;
use crate::format::{VERSION_DEFLATE, VERSION_RAW};

/// Payload content encoding, identified by the leading version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadVersion {
    /// Phrase bytes stored as-is.
    Raw,
    /// Phrase bytes stored as a raw DEFLATE stream.
    Deflate,
}

impl PayloadVersion {
    /// Returns the wire byte for this version.
    pub fn as_byte(self) -> u8 {
        match self {
            PayloadVersion::Raw => VERSION_RAW,
            PayloadVersion::Deflate => VERSION_DEFLATE,
        }
    }
}

impl TryFrom<u8> for PayloadVersion {
    type Error = DecodeError;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        match version {
            VERSION_RAW => Ok(PayloadVersion::Raw),
            VERSION_DEFLATE => Ok(PayloadVersion::Deflate),
            _ => Err(DecodeError::UnknownVersion { version }),
        }
    }
}

/// Header-level view of a payload, read without decompressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadInfo {
    pub version: PayloadVersion,
    /// Length of the content after the version byte.
    pub content_len: usize,
}

// =============================================================================
// ENCODING
// =============================================================================

/// Builds the payload for a phrase using the default [`Deflate`] compressor.
pub fn build_payload(phrase: &str) -> Vec<u8> {
    build_payload_with(phrase, &Deflate::default())
}

/// Builds the payload for a phrase, choosing whichever encoding is smaller.
///
/// The DEFLATE form is used only when compression succeeds and its output is
/// strictly shorter than the raw bytes. A compressor error falls back to raw.
pub fn build_payload_with<C: Compressor + ?Sized>(phrase: &str, compressor: &C) -> Vec<u8> {
    let raw = phrase.as_bytes();

    let compressed = match compressor.compress(raw) {
        Ok(compressed) => Some(compressed),
        Err(e) => {
            tracing::debug!(error = %e, "compression failed, using raw payload");
            None
        }
    };

    match compressed {
        Some(compressed) if compressed.len() < raw.len() => {
            tracing::trace!(
                raw_len = raw.len(),
                compressed_len = compressed.len(),
                "using deflate payload"
            );
            with_version(PayloadVersion::Deflate, &compressed)
        }
        _ => {
            tracing::trace!(raw_len = raw.len(), "using raw payload");
            with_version(PayloadVersion::Raw, raw)
        }
    }
}

fn with_version(version: PayloadVersion, content: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(1 + content.len());
    payload.push(version.as_byte());
    payload.extend_from_slice(content);
    payload
}

// =============================================================================
// DECODING
// =============================================================================

/// Reads the version byte and content length of a payload.
pub fn inspect_payload(payload: &[u8]) -> Result<PayloadInfo, DecodeError> {
    let (&version, content) = payload.split_first().ok_or(DecodeError::EmptyPayload)?;
    Ok(PayloadInfo {
        version: PayloadVersion::try_from(version)?,
        content_len: content.len(),
    })
}

/// Parses a payload back into its phrase using the default [`Deflate`].
pub fn parse_payload(payload: &[u8]) -> Result<String, DecodeError> {
    parse_payload_with(payload, &Deflate::default())
}

/// Parses a payload back into its phrase.
pub fn parse_payload_with<C: Compressor + ?Sized>(
    payload: &[u8],
    compressor: &C,
) -> Result<String, DecodeError> {
    let (&version, content) = payload.split_first().ok_or(DecodeError::EmptyPayload)?;

    let bytes = match PayloadVersion::try_from(version)? {
        PayloadVersion::Raw => content.to_vec(),
        PayloadVersion::Deflate => compressor
            .decompress(content)
            .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?,
    };

    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;

    /// Compressor whose every call fails.
    struct Broken;

    impl Compressor for Broken {
        fn compress(&self, _raw: &[u8]) -> io::Result<Vec<u8>> {
            Err(io::Error::other("compressor unavailable"))
        }

        fn decompress(&self, _compressed: &[u8]) -> io::Result<Vec<u8>> {
            Err(io::Error::other("compressor unavailable"))
        }
    }

    /// Compressor that returns exactly as many bytes as it was given.
    struct SameSize;

    impl Compressor for SameSize {
        fn compress(&self, raw: &[u8]) -> io::Result<Vec<u8>> {
            Ok(raw.iter().map(|b| !b).collect())
        }

        fn decompress(&self, compressed: &[u8]) -> io::Result<Vec<u8>> {
            Ok(compressed.iter().map(|b| !b).collect())
        }
    }

    #[test]
    fn test_roundtrip_basic() {
        let phrases = [
            "",
            "a",
            "abandon ability able about above absent absorb abstract absurd abuse access accident",
            "unicode: \u{1F600} ключ 鍵",
        ];

        for phrase in phrases {
            let payload = build_payload(phrase);
            assert_eq!(parse_payload(&payload).unwrap(), phrase, "failed for {:?}", phrase);
        }
    }

    #[test]
    fn test_repetitive_phrase_uses_deflate() {
        let phrase = "zoo ".repeat(24);
        let payload = build_payload(&phrase);

        assert_eq!(payload[0], VERSION_DEFLATE);
        assert!(payload.len() < 1 + phrase.len());
        assert_eq!(parse_payload(&payload).unwrap(), phrase);
    }

    #[test]
    fn test_short_phrase_uses_raw() {
        let payload = build_payload("x7Qp");
        assert_eq!(payload, [&[VERSION_RAW][..], &b"x7Qp"[..]].concat());
    }

    #[test]
    fn test_empty_phrase_uses_raw() {
        let payload = build_payload("");
        assert_eq!(payload, vec![VERSION_RAW]);
        assert_eq!(parse_payload(&payload).unwrap(), "");
    }

    #[test]
    fn test_compression_failure_falls_back_to_raw() {
        let phrase = "zoo ".repeat(24);
        let payload = build_payload_with(&phrase, &Broken);

        assert_eq!(payload[0], VERSION_RAW);
        assert_eq!(&payload[1..], phrase.as_bytes());
    }

    #[test]
    fn test_equal_size_compression_not_used() {
        let payload = build_payload_with("abcdef", &SameSize);
        assert_eq!(payload[0], VERSION_RAW);
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(parse_payload(&[]), Err(DecodeError::EmptyPayload));
        assert_eq!(inspect_payload(&[]), Err(DecodeError::EmptyPayload));
    }

    #[test]
    fn test_unknown_version() {
        let result = parse_payload(&[0x03, b'h', b'i']);
        assert_eq!(result, Err(DecodeError::UnknownVersion { version: 0x03 }));

        let result = parse_payload(&[0x00]);
        assert_eq!(result, Err(DecodeError::UnknownVersion { version: 0x00 }));
    }

    #[test]
    fn test_decompression_failure() {
        let result = parse_payload(&[VERSION_DEFLATE, 0xFF, 0xFF, 0xFF]);
        assert!(matches!(result, Err(DecodeError::DecompressionFailed(_))));

        let result = parse_payload_with(&[VERSION_DEFLATE, 0x01], &Broken);
        assert_eq!(
            result,
            Err(DecodeError::DecompressionFailed("compressor unavailable".to_string()))
        );
    }

    #[test]
    fn test_inflated_size_limit_rejected() {
        let phrase = "zoo ".repeat(1024);
        let payload = build_payload(&phrase);
        assert_eq!(payload[0], VERSION_DEFLATE);

        let small = Deflate::default().with_max_inflated_len(256);
        let result = parse_payload_with(&payload, &small);
        assert!(matches!(result, Err(DecodeError::DecompressionFailed(_))));
        assert_eq!(parse_payload(&payload).unwrap(), phrase);
    }

    #[test]
    fn test_invalid_utf8_raw() {
        let result = parse_payload(&[VERSION_RAW, 0xC3, 0x28]);
        assert_eq!(result, Err(DecodeError::InvalidUtf8));
    }

    #[test]
    fn test_invalid_utf8_deflate() {
        let compressed = Deflate::default().compress(&[0xFF; 32]).unwrap();
        let mut payload = vec![VERSION_DEFLATE];
        payload.extend_from_slice(&compressed);

        assert_eq!(parse_payload(&payload), Err(DecodeError::InvalidUtf8));
    }

    #[test]
    fn test_inspect() {
        let info = inspect_payload(&build_payload("hi")).unwrap();
        assert_eq!(
            info,
            PayloadInfo {
                version: PayloadVersion::Raw,
                content_len: 2,
            }
        );

        let phrase = "zoo ".repeat(24);
        let payload = build_payload(&phrase);
        let info = inspect_payload(&payload).unwrap();
        assert_eq!(info.version, PayloadVersion::Deflate);
        assert_eq!(info.content_len, payload.len() - 1);
    }

    #[test]
    fn test_version_bytes() {
        assert_eq!(PayloadVersion::Raw.as_byte(), 0x01);
        assert_eq!(PayloadVersion::Deflate.as_byte(), 0x02);
        assert_eq!(PayloadVersion::try_from(0x02), Ok(PayloadVersion::Deflate));
        assert_eq!(
            PayloadVersion::try_from(0xFF),
            Err(DecodeError::UnknownVersion { version: 0xFF })
        );
    }

    proptest! {
        #[test]
        fn prop_roundtrip(phrase in any::<String>()) {
            let payload = build_payload(&phrase);
            prop_assert_eq!(parse_payload(&payload).unwrap(), phrase);
        }

        #[test]
        fn prop_never_larger_than_raw(phrase in "[a-z ]{0,200}") {
            let payload = build_payload(&phrase);
            prop_assert!(payload.len() <= 1 + phrase.len());
        }
    }
}
