//! Instrumentation utilities for the Ponte solve lifecycle.
//!
//! Tracks wall-clock time and resident memory across the phases of a
//! solve (conversion, setup, native solve, reporting).

pub mod probe;

pub use probe::{PhaseProbe, PhaseSnapshot, ProbeError};
