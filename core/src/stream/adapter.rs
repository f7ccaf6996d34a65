//! stream/adapter.rs
//! Block-aligned buffering between a byte stream and a `BlockTransform`.
//!
//! Design notes:
//! - Direction is a type parameter: `Reading<R>` pulls from a source and
//!   decodes, `Writing<W>` encodes and pushes to a sink. An adapter can never
//!   hold both.
//! - Scratch capacity is at least two blocks, so one chunk step always leaves
//!   `block_size - 1` bytes of headroom for a transform that flushes a held
//!   partial block.
//! - Chunk accounting tracks bytes *consumed*, never bytes produced.
//! - Finalize runs once: in read mode on the first empty source read, in
//!   write mode on the `Open -> Closed` transition taken by `close`.

use std::io::{self, Read, Write};
use std::mem;

use zeroize::Zeroize;

use crate::config::StreamConfig;
use crate::telemetry::StreamCounters;
use crate::transform::{BlockTransform, TransformError};
use crate::types::StreamError;
use crate::utils::max_chunk_for;

mod sealed {
    pub trait Sealed {}
}

/// Stream direction of an adapter. Implemented by [`Reading`] and [`Writing`] only.
pub trait Device: sealed::Sealed {
    #[doc(hidden)]
    fn shutdown<T: BlockTransform>(
        &mut self,
        transform: &mut T,
        scratch: &mut [u8],
        counters: &mut StreamCounters,
    ) -> Result<(), StreamError>;
}

/// Read direction: the source plus its end-of-stream flag.
pub struct Reading<R> {
    source: Option<R>,
    exhausted: bool,
}

/// Write-direction sink lifecycle. `Closed` keeps the sink (when it survived
/// finalization) so it can be handed back to the caller.
pub enum SinkState<W> {
    Open(W),
    Closed(Option<W>),
}

/// Write direction.
pub struct Writing<W> {
    state: SinkState<W>,
}

impl<R> sealed::Sealed for Reading<R> {}
impl<W> sealed::Sealed for Writing<W> {}

impl<R: Read> Device for Reading<R> {
    fn shutdown<T: BlockTransform>(
        &mut self,
        _transform: &mut T,
        _scratch: &mut [u8],
        _counters: &mut StreamCounters,
    ) -> Result<(), StreamError> {
        // Finalize already ran (or never will) on the read path.
        self.source = None;
        Ok(())
    }
}

impl<W: Write> Device for Writing<W> {
    fn shutdown<T: BlockTransform>(
        &mut self,
        transform: &mut T,
        scratch: &mut [u8],
        counters: &mut StreamCounters,
    ) -> Result<(), StreamError> {
        if let SinkState::Open(sink) = &mut self.state {
            sink.flush()?;
        }

        // Leave `Open` before finalizing: a failing finalize or sink write
        // must not allow a second finalize on the next close.
        let mut sink = match mem::replace(&mut self.state, SinkState::Closed(None)) {
            SinkState::Open(sink) => sink,
            closed => {
                self.state = closed;
                return Ok(());
            }
        };

        let result = finalize_into(&mut sink, transform, scratch, counters);
        self.state = SinkState::Closed(Some(sink));
        result
    }
}

fn finalize_into<W: Write, T: BlockTransform>(
    sink: &mut W,
    transform: &mut T,
    scratch: &mut [u8],
    counters: &mut StreamCounters,
) -> Result<(), StreamError> {
    let produced = checked_output(transform.finalize(scratch)?, scratch.len())?;
    counters.add_finalize(produced);
    log::debug!("write-side finalize produced {} bytes", produced);

    if produced > 0 {
        sink.write_all(&scratch[..produced])
            .map_err(|source| StreamError::Sink { consumed: 0, source })?;
        counters.add_sink_write();
    }
    sink.flush()?;
    Ok(())
}

/// Reject a produced count larger than the output slice it was written to.
fn checked_output(produced: usize, available: usize) -> Result<usize, StreamError> {
    if produced > available {
        return Err(TransformError::OutputTooSmall { needed: produced, available }.into());
    }
    Ok(produced)
}

fn read_some<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match source.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Owns a transform and a fixed scratch buffer and moves bytes between a
/// stream and the transform in block-safe chunks.
pub struct StreamAdapter<T: BlockTransform, D: Device> {
    transform: T,
    block_size: usize,
    scratch: Vec<u8>,
    device: D,
    counters: StreamCounters,
}

impl<T: BlockTransform, D: Device> StreamAdapter<T, D> {
    fn with_device(device: D, transform: T, buffer_size: usize) -> Result<Self, StreamError> {
        let block_size = transform.block_size();
        let buffer_size = StreamConfig::new(Some(buffer_size)).resolve_buffer_size(block_size)?;
        log::debug!("stream adapter: block_size={}, buffer_size={}", block_size, buffer_size);

        Ok(Self {
            transform,
            block_size,
            scratch: vec![0u8; buffer_size],
            device,
            counters: StreamCounters::default(),
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn buffer_size(&self) -> usize {
        self.scratch.len()
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Write mode: flush, finalize once, emit the trailer.
    /// Read mode: detach the source.
    ///
    /// Safe to call any number of times; only the first call finalizes.
    pub fn close(&mut self) -> Result<(), StreamError> {
        self.device.shutdown(&mut self.transform, &mut self.scratch, &mut self.counters)
    }
}

impl<T: BlockTransform, D: Device> Drop for StreamAdapter<T, D> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("discarding error from implicit close: {}", e);
        }
        self.scratch.zeroize();
    }
}

// ================= Read mode =================

impl<T: BlockTransform, R: Read> StreamAdapter<T, Reading<R>> {
    pub fn for_source(source: R, transform: T, buffer_size: usize) -> Result<Self, StreamError> {
        Self::with_device(Reading { source: Some(source), exhausted: false }, transform, buffer_size)
    }

    pub fn for_source_with_config(source: R, transform: T, config: &StreamConfig) -> Result<Self, StreamError> {
        let buffer_size = config.resolve_buffer_size(transform.block_size())?;
        Self::for_source(source, transform, buffer_size)
    }

    /// Fill `out` with decoded bytes.
    ///
    /// Returns 0 only at end of stream (or after `close`). Stops early when
    /// the room left in `out` cannot take another block; call again with
    /// fresh space to continue.
    ///
    /// The source is marked exhausted before `finalize` runs. If finalize
    /// fails, the error is returned once and later calls return 0, which
    /// must not be taken as a verified end of stream.
    pub fn read_from_device(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        let mut count = 0;

        loop {
            let Reading { source, exhausted } = &mut self.device;
            let Some(src) = source.as_mut() else { break };
            if *exhausted {
                break;
            }

            let Some(m) = max_chunk_for(out.len() - count, self.block_size) else { break };
            let want = m.min(self.scratch.len());

            let n = read_some(src, &mut self.scratch[..want])?;
            if n == 0 {
                *exhausted = true;
                let room = out.len() - count;
                let produced = checked_output(self.transform.finalize(&mut out[count..])?, room)?;
                self.counters.add_finalize(produced);
                log::debug!("source exhausted; finalize produced {} bytes", produced);
                count += produced;
                break;
            }

            self.counters.add_source_read();
            let room = out.len() - count;
            let produced = checked_output(self.transform.transform(&self.scratch[..n], &mut out[count..])?, room)?;
            self.counters.add_transform(n, produced);
            log::trace!("read chunk: {} in, {} out", n, produced);
            count += produced;
        }

        debug_assert!(count <= out.len());
        Ok(count)
    }

    pub fn is_exhausted(&self) -> bool {
        self.device.exhausted
    }

    pub fn is_closed(&self) -> bool {
        self.device.source.is_none()
    }

    pub fn get_ref(&self) -> Option<&R> {
        self.device.source.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut R> {
        self.device.source.as_mut()
    }

    /// Detach and return the source, if still attached.
    pub fn into_inner(mut self) -> Option<R> {
        self.device.source.take()
    }
}

// ================= Write mode =================

impl<T: BlockTransform, W: Write> StreamAdapter<T, Writing<W>> {
    pub fn for_sink(sink: W, transform: T, buffer_size: usize) -> Result<Self, StreamError> {
        Self::with_device(Writing { state: SinkState::Open(sink) }, transform, buffer_size)
    }

    pub fn for_sink_with_config(sink: W, transform: T, config: &StreamConfig) -> Result<Self, StreamError> {
        let buffer_size = config.resolve_buffer_size(transform.block_size())?;
        Self::for_sink(sink, transform, buffer_size)
    }

    /// Encode all of `input` and forward the output to the sink.
    ///
    /// Returns the number of input bytes consumed (`input.len()` on success,
    /// 0 once closed). A sink failure reports how many bytes had already been
    /// consumed in this call; they are not rolled back.
    pub fn write_to_device(&mut self, input: &[u8]) -> Result<usize, StreamError> {
        let SinkState::Open(sink) = &mut self.device.state else { return Ok(0) };

        let max_chunk = self.scratch.len() - (self.block_size - 1);
        let mut consumed = 0;

        while consumed < input.len() {
            let n = (input.len() - consumed).min(max_chunk);
            let produced = self.transform.transform(&input[consumed..consumed + n], &mut self.scratch)?;
            let produced = checked_output(produced, self.scratch.len())?;
            self.counters.add_transform(n, produced);
            consumed += n;

            if produced > 0 {
                sink.write_all(&self.scratch[..produced])
                    .map_err(|source| StreamError::Sink { consumed, source })?;
                self.counters.add_sink_write();
            }
            log::trace!("write chunk: {} in, {} out", n, produced);
        }

        Ok(consumed)
    }

    /// Flush the sink without finalizing.
    pub fn flush(&mut self) -> Result<(), StreamError> {
        if let SinkState::Open(sink) = &mut self.device.state {
            sink.flush()?;
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.device.state, SinkState::Closed(_))
    }

    pub fn get_ref(&self) -> Option<&W> {
        match &self.device.state {
            SinkState::Open(sink) | SinkState::Closed(Some(sink)) => Some(sink),
            SinkState::Closed(None) => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut W> {
        match &mut self.device.state {
            SinkState::Open(sink) | SinkState::Closed(Some(sink)) => Some(sink),
            SinkState::Closed(None) => None,
        }
    }

    /// Close and return the sink. A close error is logged and dropped; use
    /// [`finish`](Self::finish) to observe it.
    pub fn into_inner(mut self) -> Option<W> {
        if let Err(e) = self.close() {
            log::warn!("discarding error from close in into_inner: {}", e);
        }
        self.take_sink()
    }

    /// Close (finalizing if still open) and return the sink.
    pub fn finish(mut self) -> Result<W, StreamError> {
        self.close()?;
        // `Closed(None)` only exists while `shutdown` holds the sink, so after
        // a successful close the sink is always present.
        self.take_sink()
            .ok_or_else(|| StreamError::Validation("sink already taken".into()))
    }

    fn take_sink(&mut self) -> Option<W> {
        match mem::replace(&mut self.device.state, SinkState::Closed(None)) {
            SinkState::Open(sink) | SinkState::Closed(Some(sink)) => Some(sink),
            SinkState::Closed(None) => None,
        }
    }
}
