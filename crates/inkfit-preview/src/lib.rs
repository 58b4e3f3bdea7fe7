#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Session configuration loaded from JSON.
pub mod config;

/// Error types for the preview module.
pub mod error;

/// The per-frame placement, warp and blend pipeline.
pub mod session;

/// Display sinks that consume composited frames.
pub mod sink;

/// Synthetic camera and tracking sources for running without a sensor.
pub mod synthetic;

pub use crate::config::PreviewConfig;
pub use crate::error::PreviewError;
pub use crate::session::{
    warp_overlay, DisplaySink, FrameOutcome, FrameSource, PreviewSession, SkipReason,
};
