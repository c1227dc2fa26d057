use thiserror::Error;

/// Errors produced while decoding.
///
/// Any error means the input is not a valid canonical encoding. No partial
/// value is returned alongside it.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended before the value was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A byte that cannot start or continue the current production.
    #[error("unexpected byte: {0:#04x}")]
    UnexpectedByte(u8),

    /// The length prefix of a byte string is not a canonical decimal number
    /// terminated by `:`.
    #[error("malformed byte string length")]
    MalformedLength,

    /// The stream ended before the declared number of bytes was read.
    #[error("byte string declared {declared} bytes but only {available} were available")]
    LengthMismatch { declared: usize, available: usize },

    #[error("integer has a leading zero")]
    LeadingZero,

    #[error("negative zero is not a valid integer")]
    NegativeZero,

    /// A `-` anywhere other than the first position of an integer.
    #[error("duplicate or misplaced sign in integer")]
    DuplicateOrMisplacedSign,

    #[error("integer has no digits")]
    EmptyInteger,

    #[error("illegal digit in integer: {0:#04x}")]
    IllegalDigit(u8),

    #[error("integer does not fit in 64 bits")]
    IntegerOverflow,

    /// A dictionary key is not strictly greater than the key before it.
    #[error("dictionary keys out of order")]
    OutOfOrderKeys,

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("byte string length {len} exceeds limit of {limit}")]
    ByteStringTooLong { len: usize, limit: usize },

    #[error("trailing data after value")]
    TrailingData,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
