use bytes::Bytes;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Mapping from byte-string key to value.
///
/// `Bytes` orders byte-wise, so iterating the map yields keys in canonical
/// order.
pub type Dictionary = BTreeMap<Bytes, Value>;

/// Canonical ordering of dictionary keys: byte-wise lexicographic.
///
/// A proper prefix sorts before any longer key it prefixes.
///
/// ```
/// use benc::compare_keys;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_keys(b"bar", b"foo"), Ordering::Less);
/// assert_eq!(compare_keys(b"foo", b"foobar"), Ordering::Less);
/// assert_eq!(compare_keys(b"Z", b"a"), Ordering::Less);
/// ```
pub fn compare_keys(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// A bencode value.
///
/// Exactly one variant exists per grammar production. A value owns all of its
/// children, so a decoded tree never borrows from the input.
///
/// # Examples
///
/// ```
/// use benc::Value;
///
/// let list = Value::List(vec![Value::Integer(10), Value::string("nima")]);
/// assert_eq!(list.as_list().map(|l| l.len()), Some(2));
///
/// let int: Value = 42i64.into();
/// assert_eq!(int.as_integer(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// Raw bytes. Not necessarily UTF-8.
    ByteString(Bytes),
    /// Values in encoded order.
    List(Vec<Value>),
    /// Key/value pairs, encoded in ascending key order.
    Dictionary(Dictionary),
}

impl Value {
    /// Creates a byte string from UTF-8 text.
    pub fn string(s: &str) -> Self {
        Value::ByteString(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Creates a byte string from anything convertible to [`Bytes`].
    pub fn bytes(b: impl Into<Bytes>) -> Self {
        Value::ByteString(b.into())
    }

    /// Builds a dictionary from key/value pairs. A repeated key keeps the
    /// last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use benc::{encode, Value};
    ///
    /// let dict = Value::dictionary([
    ///     ("world", Value::string("2")),
    ///     ("hello", Value::Integer(1)),
    /// ]);
    /// assert_eq!(encode(&dict), b"d5:helloi1e5:world1:2e");
    /// ```
    pub fn dictionary<K, I>(pairs: I) -> Self
    where
        K: AsRef<[u8]>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Dictionary(
            pairs
                .into_iter()
                .map(|(k, v)| (Bytes::copy_from_slice(k.as_ref()), v))
                .collect(),
        )
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::ByteString(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the byte string as text if it is valid UTF-8.
    ///
    /// ```
    /// use benc::Value;
    ///
    /// assert_eq!(Value::string("spam").as_str(), Some("spam"));
    /// assert_eq!(Value::bytes(vec![0xff]).as_str(), None);
    /// assert_eq!(Value::Integer(1).as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::ByteString(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn into_dictionary(self) -> Option<Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a dictionary.
    ///
    /// ```
    /// use benc::Value;
    ///
    /// let value = benc::decode(b"d3:bar4:spam3:fooi42ee").unwrap();
    /// assert_eq!(value.get(b"foo"), Some(&Value::Integer(42)));
    /// assert_eq!(value.get(b"baz"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dictionary()?.get(key)
    }

    /// Length in bytes of this value's canonical encoding.
    ///
    /// ```
    /// use benc::{encode, Value};
    ///
    /// let value = Value::List(vec![Value::Integer(-10), Value::string("nima")]);
    /// assert_eq!(value.encoded_len(), encode(&value).len());
    /// ```
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::Integer(i) => {
                let sign = usize::from(*i < 0);
                2 + sign + decimal_len(i.unsigned_abs())
            }
            Value::ByteString(b) => byte_string_len(b.len()),
            Value::List(l) => 2 + l.iter().map(Value::encoded_len).sum::<usize>(),
            Value::Dictionary(d) => {
                2 + d
                    .iter()
                    .map(|(k, v)| byte_string_len(k.len()) + v.encoded_len())
                    .sum::<usize>()
            }
        }
    }
}

fn byte_string_len(len: usize) -> usize {
    decimal_len(len as u64) + 1 + len
}

fn decimal_len(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::ByteString(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::ByteString(Bytes::from(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dictionary> for Value {
    fn from(d: Dictionary) -> Self {
        Value::Dictionary(d)
    }
}
