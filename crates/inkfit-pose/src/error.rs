use inkfit_image::ImageSize;

/// An error type for the pose module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PoseError {
    /// The overlay has a zero dimension, so no scale can be derived from it.
    #[error("Invalid overlay size {0}, both dimensions must be positive")]
    InvalidOverlaySize(ImageSize),

    /// The length ratio must be a positive finite number.
    #[error("Invalid length ratio {0}")]
    InvalidLengthRatio(f32),

    /// The zoom bounds are not a valid positive range.
    #[error("Invalid zoom bounds [{0}, {1}]")]
    InvalidZoomBounds(f32, f32),

    /// A zoom rate must be a positive finite multiplier.
    #[error("Invalid zoom rate {0}")]
    InvalidZoomRate(f32),
}
