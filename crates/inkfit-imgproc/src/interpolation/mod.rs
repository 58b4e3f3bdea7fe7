//! Pixel interpolation methods for image transformations.
//!
//! These kernels are used when resampling the overlay under a placement
//! transform.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//! - **Bicubic**: 4x4 cubic convolution, keeps rotated edges and the alpha
//!   channel smooth

mod bicubic;
mod bilinear;
pub(crate) mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
