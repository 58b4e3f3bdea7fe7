use std::f32::consts::PI;

use inkfit_image::{Image, ImageDtype, ImageError};

use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;

/// Inverts a 2x3 affine transformation matrix.
///
/// A singular matrix (zero determinant) inverts to the zero matrix, mapping
/// every destination pixel onto the source origin.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// With the image y axis pointing down, a positive angle turns the image
/// counter-clockwise on screen.
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use inkfit_imgproc::warp::get_rotation_matrix2d;
///
/// let m = get_rotation_matrix2d((10.0, 10.0), 0.0, 1.0);
/// assert_eq!(m, [1.0, 0.0, 0.0, -0.0, 1.0, 0.0]);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle * PI / 180.0f32;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Applies an affine transformation to a point.
pub fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// Every destination pixel is written: pixels whose preimage falls outside
/// the source are set to `T::default()`, which for an RGBA overlay is fully
/// transparent. The destination may have a different size than the source.
/// A matrix that cannot be inverted maps nothing, so the whole destination
/// is set to `T::default()`.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, fully overwritten.
/// * `m` - The 2x3 affine transformation matrix mapping source to destination.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use inkfit_image::{Image, ImageSize};
/// use inkfit_imgproc::interpolation::InterpolationMode;
/// use inkfit_imgproc::warp::warp_affine;
///
/// let src = Image::<u8, 4>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     255,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
///
/// let mut dst = Image::<u8, 4>::from_size_val(src.size(), 0).unwrap();
///
/// warp_affine(&src, &mut dst, &m, InterpolationMode::Bicubic).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn warp_affine<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if C == 0 {
        return Err(ImageError::InvalidChannels(C, 1));
    }

    let determinant = m[0] * m[4] - m[1] * m[3];
    if !(determinant.is_finite() && determinant != 0.0) {
        parallel::par_iter_rows_indexed(dst, |_, _, dst_pixel| dst_pixel.fill(T::default()));
        return Ok(());
    }

    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m);
    let (src_cols, src_rows) = (src.cols(), src.rows());

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let (u, v) = transform_point(x as f32, y as f32, &m_inv);

        if !interpolation.covers(u, v, src_cols, src_rows) {
            dst_pixel.fill(T::default());
            return;
        }

        let sample = interpolate_pixel(src, u, v, interpolation);
        dst_pixel
            .iter_mut()
            .zip(sample.iter())
            .for_each(|(pixel, &val)| *pixel = T::from_f32(val));
    });

    Ok(())
}
