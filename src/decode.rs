use crate::config::{DecoderConfig, MAX_LENGTH_DIGITS};
use crate::error::DecodeError;
use crate::source::ByteSource;
use crate::value::{compare_keys, Dictionary, Value};
use bytes::Bytes;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Decodes exactly one value from a complete buffer.
///
/// Fails with [`DecodeError::TrailingData`] if any bytes follow the value.
///
/// # Examples
///
/// ```
/// use benc::{decode, Value};
///
/// assert_eq!(decode(b"i-500000000000000e").unwrap(), Value::Integer(-500000000000000));
/// assert_eq!(decode(b"2:ab").unwrap(), Value::string("ab"));
/// assert!(decode(b"i42eextra").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    decode_with(data, DecoderConfig::default())
}

/// Like [`decode`], with explicit limits.
pub fn decode_with(data: &[u8], config: DecoderConfig) -> Result<Value, DecodeError> {
    let mut decoder = Decoder::with_config(data, config);
    let value = decoder.decode_one()?;

    if !decoder.is_exhausted()? {
        return Err(DecodeError::TrailingData);
    }

    Ok(value)
}

/// Decodes one value from `source`, leaving it positioned just past the value.
///
/// Pass `&mut reader` to keep using the reader afterwards.
///
/// ```
/// use benc::{decode_one, Value};
///
/// let mut input: &[u8] = b"l2:abi5eei7e";
/// let first = decode_one(&mut input).unwrap();
/// assert_eq!(first, Value::List(vec![Value::string("ab"), Value::Integer(5)]));
/// assert_eq!(input, b"i7e");
/// ```
pub fn decode_one<S: ByteSource>(source: S) -> Result<Value, DecodeError> {
    Decoder::new(source).decode_one()
}

/// Recursive-descent decoder over a [`ByteSource`].
///
/// Each call to [`decode_one`](Decoder::decode_one) consumes exactly the bytes
/// of one value, so a stream of concatenated values can be read by calling it
/// repeatedly.
///
/// ```
/// use benc::{Decoder, Value};
/// use std::io::BufReader;
///
/// let input: &[u8] = b"i1e3:twoi3e";
/// let mut decoder = Decoder::new(BufReader::with_capacity(2, input));
///
/// let mut values = Vec::new();
/// while !decoder.is_exhausted().unwrap() {
///     values.push(decoder.decode_one().unwrap());
/// }
/// assert_eq!(values, [Value::Integer(1), Value::string("two"), Value::Integer(3)]);
/// assert_eq!(decoder.position(), 11);
/// ```
#[derive(Debug)]
pub struct Decoder<S> {
    source: S,
    config: DecoderConfig,
    position: u64,
}

impl<S: ByteSource> Decoder<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, DecoderConfig::default())
    }

    pub fn with_config(source: S, config: DecoderConfig) -> Self {
        Self {
            source,
            config,
            position: 0,
        }
    }

    /// Decodes the next value. On error the stream may have been advanced
    /// past the offending byte and cannot be resumed.
    pub fn decode_one(&mut self) -> Result<Value, DecodeError> {
        let start = self.position;
        match self.decode_value(0) {
            Ok(value) => Ok(value),
            Err(e) => {
                debug!(start, position = self.position, error = %e, "bencode decode failed");
                Err(e)
            }
        }
    }

    /// Returns `true` if the source has no more bytes.
    pub fn is_exhausted(&mut self) -> Result<bool, DecodeError> {
        Ok(self.source.peek()?.is_none())
    }

    /// Bytes consumed from the source so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn peek(&mut self) -> Result<Option<u8>, DecodeError> {
        Ok(self.source.peek()?)
    }

    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self.source.next_byte()?.ok_or(DecodeError::UnexpectedEof)?;
        self.position += 1;
        Ok(byte)
    }

    fn bump(&mut self) {
        self.source.discard(1);
        self.position += 1;
    }

    /// `depth` counts the containers enclosing the value about to be read.
    fn decode_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        match self.peek()? {
            None => Err(DecodeError::UnexpectedEof),
            Some(b'i') => self.decode_integer().map(Value::Integer),
            Some(b'0'..=b'9') => self.decode_byte_string().map(Value::ByteString),
            Some(b'l') => self.decode_list(depth),
            Some(b'd') => self.decode_dictionary(depth),
            Some(c) => Err(DecodeError::UnexpectedByte(c)),
        }
    }

    fn decode_integer(&mut self) -> Result<i64, DecodeError> {
        self.bump();

        let mut negative = false;
        let mut leading_zero = false;
        let mut digits = 0usize;
        let mut value: i64 = 0;

        loop {
            match self.next_byte()? {
                b'e' => break,
                b'-' if digits == 0 && !negative => negative = true,
                b'-' => return Err(DecodeError::DuplicateOrMisplacedSign),
                c @ b'0'..=b'9' => {
                    if leading_zero {
                        return Err(DecodeError::LeadingZero);
                    }
                    if digits == 0 && c == b'0' {
                        if negative {
                            return Err(DecodeError::NegativeZero);
                        }
                        leading_zero = true;
                    }

                    // Accumulating negatives downwards reaches i64::MIN.
                    let digit = i64::from(c - b'0');
                    value = value
                        .checked_mul(10)
                        .and_then(|v| {
                            if negative {
                                v.checked_sub(digit)
                            } else {
                                v.checked_add(digit)
                            }
                        })
                        .ok_or(DecodeError::IntegerOverflow)?;
                    digits += 1;
                }
                c => return Err(DecodeError::IllegalDigit(c)),
            }
        }

        if digits == 0 {
            return Err(DecodeError::EmptyInteger);
        }

        Ok(value)
    }

    fn decode_byte_string(&mut self) -> Result<Bytes, DecodeError> {
        // One extra byte so an over-long prefix is seen as such.
        let prefix_limit = MAX_LENGTH_DIGITS + 1;
        let mut prefix = Vec::with_capacity(prefix_limit);
        let found = self
            .source
            .read_delimited(b':', &mut prefix, prefix_limit)?;
        self.position += prefix.len() as u64 + u64::from(found);

        if !found {
            let ran_out = prefix.len() < prefix_limit;
            if ran_out && prefix.iter().all(u8::is_ascii_digit) {
                return Err(DecodeError::UnexpectedEof);
            }
            return Err(DecodeError::MalformedLength);
        }

        let len = parse_length(&prefix)?;

        if let Some(limit) = self.config.max_byte_string_len {
            if len > limit {
                return Err(DecodeError::ByteStringTooLong { len, limit });
            }
        }

        let chunk_size = self.config.read_chunk_size;
        if len > chunk_size {
            trace!(len, chunk_size, "reading byte string in chunks");
        }

        let mut data = Vec::with_capacity(len.min(chunk_size));
        let available = self.source.read_chunked(len, chunk_size, &mut data)?;
        self.position += available as u64;

        if available != len {
            return Err(DecodeError::LengthMismatch {
                declared: len,
                available,
            });
        }

        Ok(Bytes::from(data))
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth >= self.config.max_depth {
            return Err(DecodeError::NestingTooDeep);
        }
        self.bump();

        let mut list = Vec::new();
        loop {
            match self.peek()? {
                None => return Err(DecodeError::UnexpectedEof),
                Some(b'e') => break,
                Some(_) => list.push(self.decode_value(depth + 1)?),
            }
        }

        self.bump();
        Ok(Value::List(list))
    }

    fn decode_dictionary(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth >= self.config.max_depth {
            return Err(DecodeError::NestingTooDeep);
        }
        self.bump();

        let mut dict = Dictionary::new();
        let mut last_key: Option<Bytes> = None;
        loop {
            match self.peek()? {
                None => return Err(DecodeError::UnexpectedEof),
                Some(b'e') => break,
                Some(b'0'..=b'9') => {}
                Some(c) => return Err(DecodeError::UnexpectedByte(c)),
            }

            let key = self.decode_byte_string()?;
            // Keys must strictly ascend, so a repeated key is rejected as well.
            if let Some(prev) = &last_key {
                if compare_keys(prev, &key) != Ordering::Less {
                    return Err(DecodeError::OutOfOrderKeys);
                }
            }

            let value = self.decode_value(depth + 1)?;
            dict.insert(key.clone(), value);
            last_key = Some(key);
        }

        self.bump();
        Ok(Value::Dictionary(dict))
    }
}

fn parse_length(digits: &[u8]) -> Result<usize, DecodeError> {
    match digits {
        [] => return Err(DecodeError::MalformedLength),
        [b'0', _, ..] => return Err(DecodeError::MalformedLength),
        _ => {}
    }

    digits.iter().try_fold(0usize, |len, &c| {
        if !c.is_ascii_digit() {
            return Err(DecodeError::MalformedLength);
        }
        len.checked_mul(10)
            .and_then(|len| len.checked_add(usize::from(c - b'0')))
            .ok_or(DecodeError::MalformedLength)
    })
}
