//! Vaultaire share links: compact, URL-safe tokens for recovery phrases.
//!
//! This crate turns a phrase into a short base58 token embedded in a link,
//! and recognizes such links when they come back in.
//!
//! # Quick Start
//!
//! ```rust
//! use vaultaire_share::{build_url, phrase_from_url};
//!
//! let phrase = "legal winner thank year wave sausage worth useful legal winner thank yellow";
//!
//! let link = build_url(phrase);
//! assert!(link.starts_with("https://vaultaire.app/s#"));
//!
//! assert_eq!(phrase_from_url(&link).as_deref(), Some(phrase));
//! assert_eq!(phrase_from_url("https://example.com/s#2g"), None);
//! ```
//!
//! # Modules
//!
//! - [`codec`]: Base58 tokens and the versioned payload inside them
//! - [`link`]: Share link shapes, token extraction and link building
//! - [`error`]: Error types
//! - [`format`]: Wire and link constants
//!
//! # Wire Format
//!
//! A token is the base58 form of `[version] ++ content`:
//! - `0x01`: content is the phrase's UTF-8 bytes
//! - `0x02`: content is raw DEFLATE of those bytes
//!
//! The encoder picks DEFLATE only when it is strictly shorter.
//!
//! # Failure Handling
//!
//! [`phrase_from_url`] returns `None` for anything that is not a well-formed
//! share link; foreign links are meant to be ignored, not reported. The
//! `try_` variants expose the [`DecodeError`] for diagnostics.

pub mod codec;
pub mod error;
pub mod format;
pub mod link;

pub use codec::{decode_token, encode_token, Compressor, Deflate, PayloadVersion};
pub use error::{DecodeError, ErrorStage};
pub use link::{LinkConfig, LinkShape, ShareLinks};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the canonical share link for a phrase.
pub fn build_url(phrase: &str) -> String {
    ShareLinks::<Deflate>::default().build_url(phrase)
}

/// Returns true if `url` is a recognized share link shape.
///
/// Only the shape is checked; the token is not decoded.
pub fn is_supported_share_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|url| ShareLinks::<Deflate>::default().is_supported(&url))
}

/// Recovers the phrase from a share link, or `None` if it is not one.
pub fn phrase_from_url(url: &str) -> Option<String> {
    ShareLinks::<Deflate>::default().phrase_from_str(url)
}

/// Recovers the phrase from a share link, reporting why it failed.
pub fn try_phrase_from_url(url: &str) -> Result<String, DecodeError> {
    ShareLinks::<Deflate>::default().try_phrase_from_str(url)
}
