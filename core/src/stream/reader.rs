//! stream/reader.rs
//! `Read` / `BufRead` facade over a read-mode adapter.

use std::io::{self, BufRead, Read};

use zeroize::Zeroizing;

use crate::config::StreamConfig;
use crate::constants::DEFAULT_BUFFER_SIZE;
use crate::stream::adapter::{Reading, StreamAdapter};
use crate::telemetry::StreamCounters;
use crate::transform::BlockTransform;
use crate::types::StreamError;

/// Decodes a source through a transform on every read.
///
/// Adapter output is staged in a `buffer_size` area, so any caller buffer
/// size works: a short read never turns into a false end-of-stream.
///
/// A finalize failure (bad padding, checksum mismatch) is reported by one
/// read; reads after that return 0. Treat the stream as verified only when
/// no error was seen.
pub struct TransformReader<R: Read, T: BlockTransform> {
    adapter: StreamAdapter<T, Reading<R>>,
    staged: Zeroizing<Vec<u8>>,
    pos: usize,
    filled: usize,
}

impl<R: Read, T: BlockTransform> TransformReader<R, T> {
    pub fn new(source: R, transform: T) -> Result<Self, StreamError> {
        Self::with_buffer_size(source, transform, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(source: R, transform: T, buffer_size: usize) -> Result<Self, StreamError> {
        let adapter = StreamAdapter::for_source(source, transform, buffer_size)?;
        Ok(Self::from_adapter(adapter))
    }

    pub fn with_config(source: R, transform: T, config: &StreamConfig) -> Result<Self, StreamError> {
        let adapter = StreamAdapter::for_source_with_config(source, transform, config)?;
        Ok(Self::from_adapter(adapter))
    }

    fn from_adapter(adapter: StreamAdapter<T, Reading<R>>) -> Self {
        let staged = Zeroizing::new(vec![0u8; adapter.buffer_size()]);
        Self { adapter, staged, pos: 0, filled: 0 }
    }

    /// Like `Read::read` but keeps the typed error.
    pub fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        if buf.is_empty() {
            return Ok(0);
        }

        // Nothing staged and the caller has room for a full refill: skip the copy.
        if self.pos >= self.filled && buf.len() >= self.staged.len() {
            return self.adapter.read_from_device(buf);
        }

        let available = self.refill()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }

    fn refill(&mut self) -> Result<&[u8], StreamError> {
        if self.pos >= self.filled {
            self.filled = self.adapter.read_from_device(&mut self.staged)?;
            self.pos = 0;
        }
        Ok(&self.staged[self.pos..self.filled])
    }

    /// Detach the source. Staged bytes are discarded; later reads return 0.
    pub fn close(&mut self) -> Result<(), StreamError> {
        self.pos = 0;
        self.filled = 0;
        self.adapter.close()
    }

    pub fn is_exhausted(&self) -> bool {
        self.adapter.is_exhausted()
    }

    pub fn counters(&self) -> &StreamCounters {
        self.adapter.counters()
    }

    pub fn block_size(&self) -> usize {
        self.adapter.block_size()
    }

    pub fn buffer_size(&self) -> usize {
        self.adapter.buffer_size()
    }

    pub fn get_ref(&self) -> Option<&R> {
        self.adapter.get_ref()
    }

    pub fn into_inner(self) -> Option<R> {
        self.adapter.into_inner()
    }
}

impl<R: Read, T: BlockTransform> Read for TransformReader<R, T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.try_read(buf)?)
    }
}

impl<R: Read, T: BlockTransform> BufRead for TransformReader<R, T> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.refill()?)
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.filled);
    }
}
