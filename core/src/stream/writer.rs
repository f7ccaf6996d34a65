//! stream/writer.rs
//! `Write` facade over a write-mode adapter.

use std::io::{self, Write};

use crate::config::StreamConfig;
use crate::constants::DEFAULT_BUFFER_SIZE;
use crate::stream::adapter::{StreamAdapter, Writing};
use crate::telemetry::StreamCounters;
use crate::transform::BlockTransform;
use crate::types::StreamError;

/// Encodes everything written through a transform into a sink.
///
/// Call [`close`](Self::close) or [`finish`](Self::finish) to observe
/// finalize and sink errors. Dropping an open writer still finalizes, but
/// any error is only logged.
pub struct TransformWriter<W: Write, T: BlockTransform> {
    adapter: StreamAdapter<T, Writing<W>>,
}

impl<W: Write, T: BlockTransform> TransformWriter<W, T> {
    pub fn new(sink: W, transform: T) -> Result<Self, StreamError> {
        Self::with_buffer_size(sink, transform, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(sink: W, transform: T, buffer_size: usize) -> Result<Self, StreamError> {
        Ok(Self { adapter: StreamAdapter::for_sink(sink, transform, buffer_size)? })
    }

    pub fn with_config(sink: W, transform: T, config: &StreamConfig) -> Result<Self, StreamError> {
        Ok(Self { adapter: StreamAdapter::for_sink_with_config(sink, transform, config)? })
    }

    /// Like `Write::write` but keeps the typed error (including the consumed
    /// count carried by `StreamError::Sink`).
    pub fn try_write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        self.adapter.write_to_device(data)
    }

    /// Finalize the transform and flush the trailer. Idempotent.
    pub fn close(&mut self) -> Result<(), StreamError> {
        self.adapter.close()
    }

    /// Close and hand back the sink.
    pub fn finish(self) -> Result<W, StreamError> {
        self.adapter.finish()
    }

    pub fn is_closed(&self) -> bool {
        self.adapter.is_closed()
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

    pub fn get_ref(&self) -> Option<&W> {
        self.adapter.get_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut W> {
        self.adapter.get_mut()
    }
}

impl<W: Write, T: BlockTransform> Write for TransformWriter<W, T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.adapter.write_to_device(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.adapter.flush()?)
    }
}
