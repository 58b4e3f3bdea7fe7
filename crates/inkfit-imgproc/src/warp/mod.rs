//! Geometric image transformations.
//!
//! This module provides the affine warp used to place the overlay:
//!
//! - Rotation matrix generation (rotation about a point plus uniform scale)
//! - Affine transform inversion
//! - Affine resampling into a canvas of a given size
//!
//! # Examples
//!
//! Rotating an image by 45 degrees about its center:
//!
//! ```no_run
//! use inkfit_imgproc::warp::get_rotation_matrix2d;
//!
//! let rotation_matrix = get_rotation_matrix2d((128.0, 128.0), 45.0, 1.0);
//! // Use with warp_affine to rotate the image
//! ```

mod affine;

pub use affine::{get_rotation_matrix2d, invert_affine_transform, transform_point, warp_affine};
