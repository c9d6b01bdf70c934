//! Base58 encoding/decoding for share tokens.
//!
//! Bytes are read as one big-endian unsigned integer and rewritten in base 58
//! over [`BASE58_ALPHABET`]. Leading zero bytes carry no magnitude, so each one
//! is written as a leading `'1'` (digit 0) and restored exactly on decode.
//!
//! The conversions use growable limb buffers with full carry propagation, so
//! they are O(n²) in the input length. Recovery phrases are short enough that
//! this does not matter.

use crate::error::DecodeError;
use crate::format::BASE58_ALPHABET;

/// Marker for bytes that are not in the alphabet.
const INVALID: u8 = 0xFF;

/// Reverse lookup from ASCII byte to digit value.
const DIGIT_VALUES: [u8; 128] = digit_table();

const fn digit_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < BASE58_ALPHABET.len() {
        table[BASE58_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns the digit value of `ch`, or `None` if it is not in the alphabet.
#[inline]
fn digit_value(ch: char) -> Option<u8> {
    if !ch.is_ascii() {
        return None;
    }
    match DIGIT_VALUES[ch as usize] {
        INVALID => None,
        value => Some(value),
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Converts a big-endian magnitude to big-endian base-58 digit values.
///
/// The result has no leading zero digits; a zero magnitude (including the
/// empty slice) yields no digits at all.
pub fn bytes_to_digits(bytes: &[u8]) -> Vec<u8> {
    // Little-endian base-58 limbs, seeded with a single zero digit.
    let mut limbs: Vec<u8> = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    limbs.push(0);

    for &byte in bytes {
        let mut carry = byte as u32;
        for limb in limbs.iter_mut() {
            carry += (*limb as u32) << 8;
            *limb = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            limbs.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    // The seed digit survives untouched only when there was no magnitude.
    if limbs.len() == 1 && limbs[0] == 0 {
        return Vec::new();
    }

    limbs.reverse();
    limbs
}

/// Encodes bytes as a base58 token.
///
/// ```rust
/// use vaultaire_share::codec::base58;
///
/// assert_eq!(base58::encode(b"hello world"), "StV1DL6CwTryKyV");
/// assert_eq!(base58::encode(&[0x00, 0x00, 0x01]), "112");
/// assert_eq!(base58::encode(&[]), "");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();
    let digits = bytes_to_digits(&bytes[zeros..]);

    let mut token = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        token.push(BASE58_ALPHABET[0] as char);
    }
    for digit in digits {
        token.push(BASE58_ALPHABET[digit as usize] as char);
    }
    token
}

// =============================================================================
// DECODING
// =============================================================================

/// Converts big-endian base-58 digit values to a big-endian magnitude.
///
/// High-order zero bytes are stripped, so a zero magnitude yields an empty
/// vector. Every digit must be below 58.
pub fn digits_to_bytes(digits: &[u8]) -> Vec<u8> {
    // Little-endian base-256 limbs.
    let mut limbs: Vec<u8> = Vec::with_capacity(digits.len() * 733 / 1000 + 1);
    limbs.push(0);

    for &digit in digits {
        debug_assert!(digit < 58, "base58 digit out of range: {}", digit);
        let mut carry = digit as u32;
        for limb in limbs.iter_mut() {
            carry += (*limb as u32) * 58;
            *limb = (carry & 0xFF) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            limbs.push((carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    while limbs.last() == Some(&0) {
        limbs.pop();
    }

    limbs.reverse();
    limbs
}

/// Decodes a base58 token back to bytes.
///
/// Fails with [`DecodeError::InvalidCharacter`] on the first character outside
/// the alphabet; `index` is its position in characters, not bytes.
pub fn decode(token: &str) -> Result<Vec<u8>, DecodeError> {
    let mut digits = Vec::with_capacity(token.len());
    for (index, ch) in token.chars().enumerate() {
        let value = digit_value(ch).ok_or(DecodeError::InvalidCharacter { ch, index })?;
        digits.push(value);
    }

    let zeros = digits.iter().take_while(|&&d| d == 0).count();
    let magnitude = digits_to_bytes(&digits[zeros..]);

    let mut bytes = Vec::with_capacity(zeros + magnitude.len());
    bytes.resize(zeros, 0);
    bytes.extend_from_slice(&magnitude);
    Ok(bytes)
}
