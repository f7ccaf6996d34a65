//! telemetry/mod.rs
//! Per-adapter counters.
//!
//! Notes:
//! - Counters are plain values owned by the adapter; no atomics, no locks.
//! - Serializable so callers can export them with their own reporting.

pub mod counters;

pub use counters::*;
