#![forbid(unsafe_code)]

//! Core: geometry, animation followers, and the logging facade shared by the
//! menu widgets.

pub mod animation;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
