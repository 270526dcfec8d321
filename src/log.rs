//! Optional logging for pipeline progress.
//!
//! Two call sites care: the normalizer/flattener report per-shape segment
//! and vertex counts at `debug!`, and the mapper reports clamped
//! out-of-bed vertices at `warn!`. Both go through `tracing` when the
//! `tracing` feature is on; otherwise the macros expand to nothing so the
//! geometry loops carry no logging cost.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
