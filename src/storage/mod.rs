//! Storage layer for extracted feedback
//!
//! Provides the cumulative store that collects structured records across
//! extraction sessions. The store is an explicit value: load it, merge into
//! it, save it. There is no process-wide table.

pub mod cumulative;

pub use cumulative::{append_to_store, merge, CumulativeStore, STORE_COLUMNS};
