/*!
A minimal pull-based byte source, shaped like C's `fread`/`ferror`/`fclose` so that adapters over
files, in-memory buffers, or sockets are trivial to write. [`Cursor`] wraps any `ByteSource` with
page buffering, one-byte lookahead, and caret (line, column) tracking: `\n` advances the line and
resets the column; any continuation byte of a multi-byte UTF-8 sequence (top two bits `10`) does
not advance the column.
*/

use loomrdf_core::Caret;
use std::collections::VecDeque;
use std::io::Read;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

pub trait ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;

    fn error(&self) -> bool {
        false
    }

    fn close(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

///
/// Adapts any `std::io::Read` into a `ByteSource`.
///
pub struct ReadSource<R> {
    inner: R,
    failed: bool,
}

impl<R: Read> ReadSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, failed: false }
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.inner.read(buf) {
            Ok(n) => Ok(n),
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }

    fn error(&self) -> bool {
        self.failed
    }
}

///
/// A `ByteSource` over an in-memory byte slice, the common case in tests.
///
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let remaining = &self.data[self.pos..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

///
/// Page-buffers a `ByteSource`, offering `peek`/`advance` one byte at a time while tracking a
/// [`Caret`]. `block_size` of `1` gives byte-at-a-time reads suitable for interactive sources;
/// larger sizes amortize the underlying `read` call for bulk sources.
///
pub struct Cursor<S> {
    source: S,
    block: Vec<u8>,
    queue: VecDeque<u8>,
    caret: Caret,
    eof: bool,
}

impl<S: ByteSource> Cursor<S> {
    pub fn new<N>(source: S, document: N, block_size: usize) -> Self
    where
        N: Into<String>,
    {
        let block_size = block_size.max(1);
        Self {
            source,
            block: vec![0u8; block_size],
            queue: VecDeque::with_capacity(block_size),
            caret: Caret::start_of(document),
            eof: false,
        }
    }

    pub fn caret(&self) -> Caret {
        self.caret.clone()
    }

    /// Ensures at least `n + 1` bytes are queued (so `peek_at(n)` can be answered), short of EOF.
    fn ensure(&mut self, n: usize) -> std::io::Result<()> {
        while self.queue.len() <= n && !self.eof {
            let read = self.source.read(&mut self.block)?;
            if read == 0 {
                self.eof = true;
            } else {
                self.queue.extend(&self.block[..read]);
            }
        }
        Ok(())
    }

    /// Returns the next byte without consuming it.
    pub fn peek(&mut self) -> std::io::Result<Option<u8>> {
        self.peek_at(0)
    }

    /// Returns the byte `n` positions ahead (`n == 0` is the same as `peek`) without consuming
    /// anything; used by the handful of two-character lookaheads the grammar needs (a `.` that
    /// might continue a decimal literal, a `"` that might open a long literal).
    pub fn peek_at(&mut self, n: usize) -> std::io::Result<Option<u8>> {
        self.ensure(n)?;
        Ok(self.queue.get(n).copied())
    }

    /// Consumes and returns the next byte, advancing the caret.
    pub fn advance(&mut self) -> std::io::Result<Option<u8>> {
        let byte = self.peek()?;
        if let Some(b) = byte {
            self.queue.pop_front();
            if b == b'\n' {
                self.caret = self.caret.advance_line();
            } else if b & 0b1100_0000 != 0b1000_0000 {
                self.caret = self.caret.advance_columns(1);
            }
        }
        Ok(byte)
    }

    pub fn error(&self) -> bool {
        self.source.error()
    }

    pub fn close(&mut self) -> std::io::Result<()> {
        self.source.close()
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_advances_line_and_resets_column() {
        let mut cursor = Cursor::new(SliceSource::new(b"ab\ncd"), "doc", 4);
        for _ in 0..3 {
            cursor.advance().unwrap();
        }
        assert_eq!(cursor.caret(), Caret::new("doc", 2, 1));
    }

    #[test]
    fn utf8_continuation_bytes_do_not_advance_column() {
        let mut cursor = Cursor::new(SliceSource::new("é".as_bytes()), "doc", 4);
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert_eq!(cursor.caret(), Caret::new("doc", 1, 2));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut cursor = Cursor::new(SliceSource::new(b"xy"), "doc", 1);
        assert_eq!(cursor.peek().unwrap(), Some(b'x'));
        assert_eq!(cursor.peek().unwrap(), Some(b'x'));
        assert_eq!(cursor.advance().unwrap(), Some(b'x'));
        assert_eq!(cursor.advance().unwrap(), Some(b'y'));
        assert_eq!(cursor.advance().unwrap(), None);
    }
}
