#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Strategies to pick the destination pixel where the overlay is centered.
pub mod anchor;

/// Error types for the pose module.
pub mod error;

/// Compute the similarity transform that aligns the overlay with the forearm.
pub mod placement;

/// 2D screen and 3D camera points.
pub mod point;

/// Tracking source contract and the anchor tracker.
pub mod tracking;

/// Hand proximity zoom controls.
pub mod zoom;

pub use crate::error::PoseError;
pub use crate::point::{Point2, Point3};
