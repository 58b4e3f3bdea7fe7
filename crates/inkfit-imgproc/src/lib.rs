#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// alpha compositing of an overlay onto a frame.
pub mod composite;

/// utilities to draw on images.
pub mod draw;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;
