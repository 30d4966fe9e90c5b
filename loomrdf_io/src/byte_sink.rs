/*!
A minimal push-based byte sink, the write-side counterpart to [`crate::byte_source::ByteSource`].
[`BlockBufferedSink`] coalesces small writes into one write call per filled block.
*/

use std::io::Write;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

pub trait ByteSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize>;

    /// Writes the whole of `buf`, looping over short writes; a zero-length write is treated as a
    /// fatal `WriteZero` error rather than retried forever.
    fn write_all(&mut self, mut buf: &[u8]) -> std::io::Result<()> {
        while !buf.is_empty() {
            let n = self.write(buf)?;
            if n == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::WriteZero, "short write"));
            }
            buf = &buf[n..];
        }
        Ok(())
    }

    fn close(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

///
/// Adapts any `std::io::Write` into a `ByteSink`.
///
pub struct WriteSink<W> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> ByteSink for WriteSink<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

///
/// A `ByteSink` that accumulates everything written to it, the common case in tests.
///
#[derive(Default)]
pub struct VecSink {
    buffer: Vec<u8>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_string(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.buffer)
    }
}

impl ByteSink for VecSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }
}

///
/// Wraps a `ByteSink`, buffering writes up to `capacity` bytes before flushing them downstream as
/// one call.
///
pub struct BlockBufferedSink<S> {
    inner: S,
    block: Vec<u8>,
    capacity: usize,
}

impl<S: ByteSink> BlockBufferedSink<S> {
    pub fn new(inner: S, capacity: usize) -> Self {
        Self {
            inner,
            block: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    fn flush_block(&mut self) -> std::io::Result<()> {
        if !self.block.is_empty() {
            self.inner.write_all(&self.block)?;
            self.block.clear();
        }
        Ok(())
    }
}

impl<S: ByteSink> ByteSink for BlockBufferedSink<S> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.block.extend_from_slice(buf);
        if self.block.len() >= self.capacity {
            self.flush_block()?;
        }
        Ok(buf.len())
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.flush_block()?;
        self.inner.close()
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        writes: usize,
        bytes: Vec<u8>,
    }

    impl ByteSink for CountingSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.writes += 1;
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    #[test]
    fn small_writes_are_coalesced_into_one_downstream_write() {
        let mut sink = BlockBufferedSink::new(CountingSink::default(), 16);
        sink.write(b"abc").unwrap();
        sink.write(b"def").unwrap();
        assert_eq!(sink.inner.writes, 0);
        sink.close().unwrap();
        assert_eq!(sink.inner.writes, 1);
        assert_eq!(sink.inner.bytes, b"abcdef");
    }

    #[test]
    fn a_write_that_fills_the_block_flushes_immediately() {
        let mut sink = BlockBufferedSink::new(CountingSink::default(), 4);
        sink.write(b"abcd").unwrap();
        assert_eq!(sink.inner.writes, 1);
    }
}
