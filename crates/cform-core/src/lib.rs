#![forbid(unsafe_code)]

//! Core: input events, the line-based frame, and logging shims.

pub mod event;
pub mod frame;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
