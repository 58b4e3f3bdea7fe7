use inkfit_image::{Image, ImageDtype};

/// Free parameter of the cubic convolution kernel, same as OpenCV's INTER_CUBIC.
const CUBIC_A: f32 = -0.75;

/// Weights of the four taps at offsets -1, 0, 1, 2 for a fractional position `t`.
fn cubic_weights(t: f32) -> [f32; 4] {
    let a = CUBIC_A;
    let t1 = t + 1.0;
    let s = 1.0 - t;

    let w0 = ((a * t1 - 5.0 * a) * t1 + 8.0 * a) * t1 - 4.0 * a;
    let w1 = ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0;
    let w2 = ((a + 2.0) * s - (a + 3.0)) * s * s + 1.0;
    let w3 = 1.0 - w0 - w1 - w2;

    [w0, w1, w2, w3]
}

/// Kernel for bicubic interpolation
///
/// Taps falling outside the image read as zero, so samples near the border
/// fade out instead of smearing the edge pixels.
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
pub(crate) fn bicubic_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [f32; C] {
    let (rows, cols) = (image.rows() as i64, image.cols() as i64);

    let (u0, v0) = (u.floor(), v.floor());
    let wx = cubic_weights(u - u0);
    let wy = cubic_weights(v - v0);
    let (iu, iv) = (u0 as i64, v0 as i64);

    let mut pixel = [0.0; C];
    for (j, wy) in wy.iter().enumerate() {
        let y = iv - 1 + j as i64;
        if y < 0 || y >= rows {
            continue;
        }
        let row = image.row(y as usize);

        for (i, wx) in wx.iter().enumerate() {
            let x = iu - 1 + i as i64;
            if x < 0 || x >= cols {
                continue;
            }

            let w = wx * wy;
            let base = x as usize * C;
            for (k, val) in pixel.iter_mut().enumerate() {
                *val += row[base + k].into() * w;
            }
        }
    }

    pixel
}
