//! Decoder tuning constants and configuration.
//!
//! The codec has no file or environment configuration. Everything a caller
//! can tune is carried by [`DecoderConfig`], whose defaults come from the
//! constants below.

/// Default maximum nesting depth of lists and dictionaries.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default number of bytes requested per read while filling a byte string.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 512;

/// Longest accepted length prefix. `usize::MAX` on 64-bit targets has 20 digits.
pub const MAX_LENGTH_DIGITS: usize = 20;

/// Limits applied by a [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```
/// use benc::DecoderConfig;
///
/// let config = DecoderConfig::default()
///     .with_max_depth(16)
///     .with_max_byte_string_len(1 << 20);
/// assert_eq!(config.max_depth, 16);
/// assert_eq!(config.max_byte_string_len, Some(1 << 20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Lists and dictionaries nested deeper than this fail with
    /// [`DecodeError::NestingTooDeep`](crate::DecodeError::NestingTooDeep).
    pub max_depth: usize,
    /// Byte strings declaring a longer length fail with
    /// [`DecodeError::ByteStringTooLong`](crate::DecodeError::ByteStringTooLong).
    /// `None` accepts any length.
    pub max_byte_string_len: Option<usize>,
    /// Upper bound on a single read while filling a byte string.
    pub read_chunk_size: usize,
}

impl DecoderConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_byte_string_len(mut self, len: usize) -> Self {
        self.max_byte_string_len = Some(len);
        self
    }

    /// Sets the read chunk size. Zero is treated as one.
    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size.max(1);
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_byte_string_len: None,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}
