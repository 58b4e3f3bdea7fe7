use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use inkfit_image::{Image, ImageDtype};

/// Interpolation mode for the resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InterpolationMode {
    /// Bilinear interpolation
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
    /// Bicubic interpolation (cubic convolution with a = -0.75)
    #[default]
    Bicubic,
}

impl InterpolationMode {
    /// Whether a sample at `(u, v)` touches the image under this kernel.
    ///
    /// The cubic kernel reads a zero border, so samples up to one pixel
    /// outside the image still produce a partially covered value.
    pub(crate) fn covers(&self, u: f32, v: f32, cols: usize, rows: usize) -> bool {
        let (cols, rows) = (cols as f32, rows as f32);
        match self {
            InterpolationMode::Bicubic => u > -1.0 && v > -1.0 && u < cols && v < rows,
            _ => u >= 0.0 && v >= 0.0 && u < cols && v < rows,
        }
    }
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated channel values as `f32`. An empty image yields zeros.
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
) -> [f32; C] {
    if image.size().is_empty() {
        return [0.0; C];
    }

    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
        InterpolationMode::Bicubic => bicubic_interpolation(image, u, v),
    }
}
