//! Token encoding/decoding for share links.
//!
//! A phrase becomes a versioned [`payload`], which is written out as a
//! [`base58`] token. [`deflate`] supplies the compression primitive.

pub mod base58;
pub mod deflate;
pub mod payload;

pub use deflate::{Compressor, Deflate};
pub use payload::{
    build_payload, build_payload_with, inspect_payload, parse_payload, parse_payload_with,
    PayloadInfo, PayloadVersion,
};

use crate::error::DecodeError;

/// Encodes a phrase as a base58 token using the default compressor.
pub fn encode_token(phrase: &str) -> String {
    base58::encode(&build_payload(phrase))
}

/// Decodes a base58 token back to its phrase using the default compressor.
pub fn decode_token(token: &str) -> Result<String, DecodeError> {
    let payload = base58::decode(token)?;
    parse_payload(&payload)
}
