//! Time-series utilities shared by sources and the orchestrator.
//!
//! Modules include:
//! - `normalize`: key source output by day and fill gaps over a range
//! - `redistribute`: rescale a series onto an authoritative total (largest remainder)
//! - `util`: validation helpers and invariants
/// Daily normalization of source output.
pub mod normalize;
/// Largest-remainder redistribution.
pub mod redistribute;
/// Validation helpers shared by the other modules.
pub mod util;
