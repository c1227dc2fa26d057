//! Byte sources the decoder reads from.
//!
//! The decoder never assumes its whole input is in memory. It only needs to
//! look at the next byte, skip bytes it has examined, and pull bounded runs of
//! bytes. [`ByteSource`] captures exactly that, and every [`BufRead`] already
//! provides it: slices, [`Cursor`](std::io::Cursor), [`BufReader`](std::io::BufReader)
//! over a file or socket, and so on.

use std::io::{self, BufRead};

/// A buffered stream of bytes supporting peek and bounded reads.
///
/// Implementations may deliver data in chunks of any size. All methods retry
/// on [`io::ErrorKind::Interrupted`].
pub trait ByteSource {
    /// Returns the next byte without consuming it, or `None` at end of stream.
    fn peek(&mut self) -> io::Result<Option<u8>>;

    /// Discards `n` bytes that have already been observed through
    /// [`peek`](Self::peek).
    fn discard(&mut self, n: usize);

    /// Appends bytes to `out` until `delim` is found, consuming the delimiter
    /// without appending it.
    ///
    /// Stops after appending `limit` bytes. Returns `true` only if the
    /// delimiter was found; on `false` the caller can tell a limit stop from
    /// end of stream by comparing `out.len()` against `limit`.
    fn read_delimited(&mut self, delim: u8, out: &mut Vec<u8>, limit: usize) -> io::Result<bool>;

    /// Appends exactly `len` bytes to `out`, pulling at most `chunk_size`
    /// bytes per step, and returns how many were appended.
    ///
    /// Returns fewer than `len` only when the stream ends first. Never
    /// consumes more than `len` bytes.
    fn read_chunked(
        &mut self,
        len: usize,
        chunk_size: usize,
        out: &mut Vec<u8>,
    ) -> io::Result<usize>;

    /// Consumes and returns the next byte.
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.discard(1);
        }
        Ok(byte)
    }
}

impl<R: BufRead + ?Sized> ByteSource for R {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn discard(&mut self, n: usize) {
        BufRead::consume(self, n);
    }

    fn read_delimited(&mut self, delim: u8, out: &mut Vec<u8>, limit: usize) -> io::Result<bool> {
        loop {
            if out.len() >= limit {
                return Ok(false);
            }

            let (found, used) = {
                let available = match self.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if available.is_empty() {
                    return Ok(false);
                }

                let room = limit - out.len();
                let window = &available[..available.len().min(room)];
                match window.iter().position(|&b| b == delim) {
                    Some(i) => {
                        out.extend_from_slice(&window[..i]);
                        (true, i + 1)
                    }
                    None => {
                        out.extend_from_slice(window);
                        (false, window.len())
                    }
                }
            };

            BufRead::consume(self, used);
            if found {
                return Ok(true);
            }
        }
    }

    fn read_chunked(
        &mut self,
        len: usize,
        chunk_size: usize,
        out: &mut Vec<u8>,
    ) -> io::Result<usize> {
        let chunk_size = chunk_size.max(1);
        let mut remaining = len;

        while remaining > 0 {
            let step = remaining.min(chunk_size);
            let taken = {
                let available = match self.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if available.is_empty() {
                    break;
                }

                let taken = available.len().min(step);
                out.reserve(step);
                out.extend_from_slice(&available[..taken]);
                taken
            };

            BufRead::consume(self, taken);
            remaining -= taken;
        }

        Ok(len - remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::Trickle;

    #[test]
    fn test_peek_does_not_consume() {
        let mut src: &[u8] = b"ab";
        assert_eq!(src.peek().unwrap(), Some(b'a'));
        assert_eq!(src.peek().unwrap(), Some(b'a'));
        assert_eq!(src.next_byte().unwrap(), Some(b'a'));
        assert_eq!(src.next_byte().unwrap(), Some(b'b'));
        assert_eq!(src.next_byte().unwrap(), None);
        assert_eq!(src.peek().unwrap(), None);
    }

    #[test]
    fn test_read_delimited_across_chunks() {
        let mut src = Trickle::new(b"12345:rest", 2);
        let mut out = Vec::new();
        assert!(src.read_delimited(b':', &mut out, 20).unwrap());
        assert_eq!(out, b"12345");
        assert_eq!(src.peek().unwrap(), Some(b'r'));
    }

    #[test]
    fn test_read_delimited_stops_at_limit() {
        let mut src: &[u8] = b"1234567:x";
        let mut out = Vec::new();
        assert!(!src.read_delimited(b':', &mut out, 4).unwrap());
        assert_eq!(out, b"1234");
        assert_eq!(src, b"567:x");
    }

    #[test]
    fn test_read_delimited_eof() {
        let mut src: &[u8] = b"123";
        let mut out = Vec::new();
        assert!(!src.read_delimited(b':', &mut out, 20).unwrap());
        assert_eq!(out, b"123");
    }

    #[test]
    fn test_read_chunked_exact() {
        let mut src = Trickle::new(b"hello world", 3);
        let mut out = Vec::new();
        assert_eq!(src.read_chunked(5, 2, &mut out).unwrap(), 5);
        assert_eq!(out, b"hello");
        assert_eq!(src.peek().unwrap(), Some(b' '));
    }

    #[test]
    fn test_read_chunked_short() {
        let mut src = Trickle::new(b"ab", 1);
        let mut out = Vec::new();
        assert_eq!(src.read_chunked(3, 512, &mut out).unwrap(), 2);
        assert_eq!(out, b"ab");
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let mut src = Trickle::new(b"xyz", 1).interrupt_every(2);
        let mut out = Vec::new();
        assert_eq!(src.read_chunked(3, 8, &mut out).unwrap(), 3);
        assert_eq!(out, b"xyz");
    }

    #[test]
    fn test_io_error_surfaces() {
        let mut src = Trickle::new(b"xyz", 1).fail_after(1);
        let mut out = Vec::new();
        let err = src.read_chunked(3, 8, &mut out).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
