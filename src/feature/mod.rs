//! Per-record resolution: geometry extraction and property filtering.

pub mod geometry;
pub mod properties;
