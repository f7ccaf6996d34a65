//! stream/pipe.rs
//! Whole-stream helpers built on the facades.
use std::io::{self, Read, Write};

use crate::config::StreamConfig;
use crate::stream::reader::TransformReader;
use crate::stream::writer::TransformWriter;
use crate::telemetry::StreamCounters;
use crate::transform::BlockTransform;
use crate::types::StreamError;

/// Summary: Copy `src` into `dst`, encoding through `transform`.
/// - Reads in `buffer_size` pieces.
/// - Finalizes once after EOF; the trailer lands in `dst`.
pub fn encode_stream<R: Read, W: Write, T: BlockTransform>(
    src: &mut R,
    dst: &mut W,
    transform: T,
    config: &StreamConfig,
) -> Result<StreamCounters, StreamError> {
    let mut writer = TransformWriter::with_config(dst, transform, config)?;
    let mut buf = vec![0u8; writer.buffer_size()];

    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        writer.try_write(&buf[..n])?;
    }

    writer.close()?;
    Ok(writer.counters().clone())
}

/// Summary: Copy `src` into `dst`, decoding through `transform`.
/// - Fails if finalize rejects the stream (bad padding, checksum, ...).
pub fn decode_stream<R: Read, W: Write, T: BlockTransform>(
    src: &mut R,
    dst: &mut W,
    transform: T,
    config: &StreamConfig,
) -> Result<StreamCounters, StreamError> {
    let mut reader = TransformReader::with_config(src, transform, config)?;
    let mut buf = vec![0u8; reader.buffer_size()];

    loop {
        let n = reader.try_read(&mut buf)?;
        if n == 0 {
            break;
        }
        dst.write_all(&buf[..n])?;
    }

    dst.flush()?;
    Ok(reader.counters().clone())
}

pub fn encode_to_vec<T: BlockTransform>(data: &[u8], transform: T) -> Result<Vec<u8>, StreamError> {
    let mut out = Vec::with_capacity(data.len() + transform.block_size());
    encode_stream(&mut &data[..], &mut out, transform, &StreamConfig::default())?;
    Ok(out)
}

pub fn decode_from_slice<T: BlockTransform>(data: &[u8], transform: T) -> Result<Vec<u8>, StreamError> {
    let mut out = Vec::with_capacity(data.len());
    decode_stream(&mut &data[..], &mut out, transform, &StreamConfig::default())?;
    Ok(out)
}
