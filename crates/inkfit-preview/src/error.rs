use inkfit_image::ImageSize;

/// An error type for the preview module.
///
/// Only initialization failures are fatal. Per-frame degradations are
/// reported through [`crate::session::FrameOutcome`] instead.
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    /// Error loading or writing an image.
    #[error(transparent)]
    Io(#[from] inkfit_io::error::IoError),

    /// Error from an image operation.
    #[error(transparent)]
    Image(#[from] inkfit_image::ImageError),

    /// Error building the placement or zoom state.
    #[error(transparent)]
    Pose(#[from] inkfit_pose::PoseError),

    /// Error reading the configuration file.
    #[error("Failed to read the configuration. {0}")]
    File(#[from] std::io::Error),

    /// Error parsing the configuration file.
    #[error("Failed to parse the configuration. {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The overlay cannot be placed.
    #[error("Invalid overlay of size {0}")]
    InvalidOverlay(ImageSize),
}
