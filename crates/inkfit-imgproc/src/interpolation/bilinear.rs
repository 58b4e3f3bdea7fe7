use inkfit_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation
///
/// Neighbors past the last row or column replicate the border.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);

    let frac_u = u.fract();
    let frac_v = v.fract();

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let (row0, row1) = (image.row(iv0), image.row(iv1));

    let p00 = &row0[iu0 * C..iu0 * C + C];
    let p01 = &row0[iu1 * C..iu1 * C + C];
    let p10 = &row1[iu0 * C..iu0 * C + C];
    let p11 = &row1[iu1 * C..iu1 * C + C];

    let mut pixel = [0.0; C];
    for (k, val) in pixel.iter_mut().enumerate() {
        *val = p00[k].into() * w00
            + p01[k].into() * w01
            + p10[k].into() * w10
            + p11[k].into() * w11;
    }

    pixel
}
