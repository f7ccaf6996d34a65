//! telemetry/counters.rs
//! Mutable counters kept by each stream adapter.
//!
//! Summary: byte totals on both sides of the transform plus call counts.
//! Read them through `StreamAdapter::counters()` or the facades.
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Deterministic counters collected during stream processing
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    /// Bytes handed to `transform` (caller bytes in write mode, source bytes in read mode).
    pub bytes_in: u64,
    /// Bytes produced by `transform` and `finalize`.
    pub bytes_out: u64,
    pub transform_calls: u64,
    pub finalize_calls: u64,
    /// Non-empty reads from the source (read mode).
    pub source_reads: u64,
    /// Successful writes to the sink (write mode).
    pub sink_writes: u64,
}

impl StreamCounters {
    /// Record one `transform` call.
    pub fn add_transform(&mut self, consumed: usize, produced: usize) {
        self.transform_calls += 1;
        self.bytes_in += consumed as u64;
        self.bytes_out += produced as u64;
    }

    /// Record the `finalize` call.
    pub fn add_finalize(&mut self, produced: usize) {
        self.finalize_calls += 1;
        self.bytes_out += produced as u64;
    }

    pub fn add_source_read(&mut self) {
        self.source_reads += 1;
    }

    pub fn add_sink_write(&mut self) {
        self.sink_writes += 1;
    }

    /// Output/input ratio, 0.0 before any input.
    pub fn expansion_ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        self.bytes_out as f64 / self.bytes_in as f64
    }

    pub fn merge(&mut self, other: &StreamCounters) {
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
        self.transform_calls += other.transform_calls;
        self.finalize_calls += other.finalize_calls;
        self.source_reads += other.source_reads;
        self.sink_writes += other.sink_writes;
    }
}

impl AddAssign for StreamCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
