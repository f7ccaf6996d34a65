//! stream: block-transform adapter and its std::io facades.
//!
//! Layers, leaf first:
//! - `adapter`: chunking, exactly-once finalize, bounded scratch.
//! - `reader` / `writer`: `Read`/`BufRead` and `Write` facades.
//! - `pipe`: whole-stream encode/decode helpers.

pub mod adapter;
pub mod reader;
pub mod writer;
pub mod pipe;

pub use adapter::{Device, Reading, SinkState, StreamAdapter, Writing};
pub use reader::TransformReader;
pub use writer::TransformWriter;
pub use pipe::{decode_from_slice, decode_stream, encode_stream, encode_to_vec};
