//! Compression primitive used by the payload codec.
//!
//! Payloads carry raw DEFLATE streams (RFC 1951): no zlib or gzip header and
//! no checksum trailer. Anything that produces and accepts that format can be
//! plugged in through [`Compressor`].

use std::io::{self, Read, Write};

use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::format::MAX_INFLATED_LEN;

/// A DEFLATE-compatible compression primitive.
///
/// `compress` failures are recovered by the caller (the phrase is sent raw).
/// `decompress` must only succeed when it reached the end of a valid stream,
/// so a truncated stream is an error rather than a short result.
pub trait Compressor {
    /// Compresses `raw` into a raw DEFLATE stream.
    fn compress(&self, raw: &[u8]) -> io::Result<Vec<u8>>;

    /// Inflates a complete raw DEFLATE stream.
    fn decompress(&self, compressed: &[u8]) -> io::Result<Vec<u8>>;
}

/// Raw DEFLATE backed by `flate2`.
#[derive(Debug, Clone, Copy)]
pub struct Deflate {
    level: Compression,
    max_inflated_len: usize,
}

impl Deflate {
    /// Creates a compressor with the given level (0-9).
    pub fn new(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
            ..Self::default()
        }
    }

    /// Sets the largest output `decompress` will produce before failing.
    pub fn with_max_inflated_len(mut self, max: usize) -> Self {
        self.max_inflated_len = max;
        self
    }

    /// Returns the configured compression level.
    pub fn level(&self) -> u32 {
        self.level.level()
    }

    pub fn max_inflated_len(&self) -> usize {
        self.max_inflated_len
    }
}

impl Default for Deflate {
    fn default() -> Self {
        Self {
            level: Compression::default(),
            max_inflated_len: MAX_INFLATED_LEN,
        }
    }
}

impl Compressor for Deflate {
    fn compress(&self, raw: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = DeflateEncoder::new(Vec::with_capacity(raw.len()), self.level);
        encoder.write_all(raw)?;
        encoder.finish()
    }

    fn decompress(&self, compressed: &[u8]) -> io::Result<Vec<u8>> {
        // Read one byte past the limit so an oversized stream is detectable.
        let limit = self.max_inflated_len.saturating_add(1) as u64;
        let mut decoder = DeflateDecoder::new(compressed).take(limit);

        let mut out = Vec::with_capacity(compressed.len().saturating_mul(4).min(limit as usize));
        decoder.read_to_end(&mut out)?;

        if out.len() > self.max_inflated_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("inflated size exceeds maximum {}", self.max_inflated_len),
            ));
        }
        Ok(out)
    }
}
