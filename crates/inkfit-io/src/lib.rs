#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// Frame rate counter for the preview loop.
pub mod fps_counter;

/// High-level image reading and writing functions.
///
/// See [`functional::read_overlay_rgba8`] for loading the tattoo artwork.
pub mod functional;
