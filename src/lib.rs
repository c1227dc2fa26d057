//! benc - a streaming bencode codec
//!
//! Bencode is the self-delimiting, type-tagged format used by `.torrent`
//! files and BitTorrent tracker responses. This crate decodes it from any
//! buffered byte stream and encodes values back to their canonical form.
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte string | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Modules
//!
//! - [`value`] - The [`Value`] tree
//! - [`source`] - The [`ByteSource`] abstraction the decoder reads from
//! - [`decode`](mod@decode) - Recursive-descent [`Decoder`]
//! - [`encode`](mod@encode) - Canonical encoder
//! - [`config`] - Decoder limits
//!
//! # Examples
//!
//! ```
//! use benc::{decode, encode, Value};
//!
//! let value = decode(b"d3:bar4:spam3:fooi42ee").unwrap();
//! assert_eq!(value.get(b"bar").and_then(Value::as_str), Some("spam"));
//! assert_eq!(value.get(b"foo").and_then(Value::as_integer), Some(42));
//!
//! assert_eq!(encode(&value), b"d3:bar4:spam3:fooi42ee");
//! ```
//!
//! Decoding from a reader, one value at a time:
//!
//! ```
//! use benc::{DecodeError, Decoder, DecoderConfig};
//! use std::io::Cursor;
//!
//! let config = DecoderConfig::default().with_max_depth(2);
//! let mut decoder = Decoder::with_config(Cursor::new(b"llee".to_vec()), config);
//! assert!(decoder.decode_one().is_ok());
//!
//! let mut decoder = Decoder::with_config(Cursor::new(b"llleee".to_vec()), config);
//! assert!(matches!(decoder.decode_one(), Err(DecodeError::NestingTooDeep)));
//! ```
//!
//! # Error Handling
//!
//! Every malformed input is a terminal [`DecodeError`] for that call; no
//! partial value is returned. Among others:
//!
//! - [`DecodeError::UnexpectedEof`] - Input ended inside a value
//! - [`DecodeError::LeadingZero`] / [`DecodeError::NegativeZero`] - Non-canonical integer
//! - [`DecodeError::LengthMismatch`] - Fewer bytes than a byte string declared
//! - [`DecodeError::OutOfOrderKeys`] - Dictionary keys not strictly ascending
//! - [`DecodeError::NestingTooDeep`] - Depth limit exceeded (64 by default)

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod source;
pub mod value;

pub use config::DecoderConfig;
pub use decode::{decode, decode_one, decode_with, Decoder};
pub use encode::{encode, encode_into, encode_to};
pub use error::DecodeError;
pub use source::ByteSource;
pub use value::{compare_keys, Dictionary, Value};
