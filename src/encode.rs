use crate::value::{compare_keys, Value};
use bytes::BufMut;
use std::cmp::Ordering;
use std::io::{self, Write};

/// Encodes a value to its canonical byte form.
///
/// - Integers: `i<number>e`, no leading zeros, no `-0`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`, keys in ascending byte order
///
/// # Examples
///
/// ```
/// use benc::{encode, Value};
///
/// let list = Value::List(vec![Value::Integer(10), Value::string("nima")]);
/// assert_eq!(encode(&list), b"li10e4:nimae");
///
/// let dict = Value::dictionary([
///     ("hello", Value::Integer(1)),
///     ("world", Value::string("2")),
/// ]);
/// assert_eq!(encode(&dict), b"d5:helloi1e5:world1:2e");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::with_capacity(value.encoded_len());
    encode_into(value, &mut buf);
    buf
}

/// Appends the encoding of `value` to `buf`.
///
/// ```
/// use benc::{encode_into, Value};
/// use bytes::BytesMut;
///
/// let mut buf = BytesMut::new();
/// encode_into(&Value::Integer(-7), &mut buf);
/// encode_into(&Value::string("x"), &mut buf);
/// assert_eq!(&buf[..], b"i-7e1:x");
/// ```
pub fn encode_into<B: BufMut>(value: &Value, buf: &mut B) {
    match value {
        Value::Integer(i) => {
            buf.put_u8(b'i');
            if *i < 0 {
                buf.put_u8(b'-');
            }
            put_decimal(buf, i.unsigned_abs());
            buf.put_u8(b'e');
        }
        Value::ByteString(b) => put_byte_string(buf, b),
        Value::List(l) => {
            buf.put_u8(b'l');
            for item in l {
                encode_into(item, buf);
            }
            buf.put_u8(b'e');
        }
        Value::Dictionary(d) => {
            // BTreeMap<Bytes, _> iterates in exactly the compare_keys order.
            debug_assert!(d
                .keys()
                .zip(d.keys().skip(1))
                .all(|(a, b)| compare_keys(a, b) == Ordering::Less));

            buf.put_u8(b'd');
            for (key, val) in d {
                put_byte_string(buf, key);
                encode_into(val, buf);
            }
            buf.put_u8(b'e');
        }
    }
}

/// Writes the encoding of `value` to `writer`.
///
/// The value is encoded in memory first, then written with a single
/// `write_all`.
pub fn encode_to<W: Write + ?Sized>(value: &Value, writer: &mut W) -> io::Result<()> {
    writer.write_all(&encode(value))
}

fn put_byte_string<B: BufMut>(buf: &mut B, bytes: &[u8]) {
    put_decimal(buf, bytes.len() as u64);
    buf.put_u8(b':');
    buf.put_slice(bytes);
}

fn put_decimal<B: BufMut>(buf: &mut B, mut n: u64) {
    let mut digits = [0u8; 20];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    buf.put_slice(&digits[start..]);
}
