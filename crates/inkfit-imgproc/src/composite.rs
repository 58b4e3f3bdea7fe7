use inkfit_image::{Image, ImageDtype, ImageError};

use crate::parallel;

/// Number of leading color channels blended into the destination.
const COLOR_CHANNELS: usize = 3;

/// Index of the alpha channel in an RGBA overlay.
const ALPHA_CHANNEL: usize = 3;

/// Returns the destination coordinate of the overlay's top-left corner so
/// that the overlay is centered on `anchor`.
///
/// The subtraction saturates, so anchors near the `i64` limits stay valid.
///
/// # Example
///
/// ```
/// use inkfit_imgproc::composite::overlay_origin;
///
/// assert_eq!(overlay_origin((50, 40), [21, 10].into()), (40, 35));
/// ```
pub fn overlay_origin(anchor: (i64, i64), overlay_size: inkfit_image::ImageSize) -> (i64, i64) {
    (
        anchor.0.saturating_sub((overlay_size.width / 2) as i64),
        anchor.1.saturating_sub((overlay_size.height / 2) as i64),
    )
}

/// Alpha-blends an RGBA overlay onto a frame, centered on `anchor`.
///
/// For every destination pixel covered by both the frame and the overlay
/// footprint, the color channels become
///
/// `dst * (1 - e) + overlay * e` with `e = overlay_alpha / 255 * opacity`.
///
/// Overlay pixels with zero alpha are skipped. A fourth destination channel
/// (e.g. the alpha of an RGBA camera frame) is left untouched. Pixels that
/// fall outside the frame are clipped, so the anchor may be anywhere,
/// including negative coordinates.
///
/// # Arguments
///
/// * `dst` - The frame to draw on, with at least three color channels.
/// * `overlay` - The RGBA overlay.
/// * `anchor` - Destination pixel where the overlay center lands.
/// * `opacity` - Global opacity, clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns an error if the frame has fewer than three channels.
///
/// # Example
///
/// ```
/// use inkfit_image::{Image, ImageSize};
/// use inkfit_imgproc::composite::composite;
///
/// let mut frame = Image::<u8, 3>::from_size_val([8, 8].into(), 0).unwrap();
/// let overlay = Image::<u8, 4>::from_size_val([2, 2].into(), 255).unwrap();
///
/// composite(&mut frame, &overlay, (4, 4), 1.0).unwrap();
///
/// assert_eq!(frame.get_pixel(4, 4), Some(&[255u8, 255, 255][..]));
/// assert_eq!(frame.get_pixel(2, 2), Some(&[0u8, 0, 0][..]));
/// ```
pub fn composite<const C: usize>(
    dst: &mut Image<u8, C>,
    overlay: &Image<u8, 4>,
    anchor: (i64, i64),
    opacity: f32,
) -> Result<(), ImageError> {
    if C < COLOR_CHANNELS {
        return Err(ImageError::InvalidChannels(C, COLOR_CHANNELS));
    }

    // NaN opacity falls through here as well
    let opacity = opacity.clamp(0.0, 1.0);
    if !(opacity > 0.0) {
        return Ok(());
    }

    let (origin_x, origin_y) = overlay_origin(anchor, overlay.size());

    // clip the overlay footprint against the frame
    let x_start = origin_x.max(0);
    let y_start = origin_y.max(0);
    let x_end = origin_x
        .saturating_add(overlay.cols() as i64)
        .min(dst.cols() as i64);
    let y_end = origin_y
        .saturating_add(overlay.rows() as i64)
        .min(dst.rows() as i64);

    if x_start >= x_end || y_start >= y_end {
        return Ok(());
    }

    let (x_start, x_end) = (x_start as usize, x_end as usize);

    parallel::par_iter_row_range(
        dst,
        y_start as usize..y_end as usize,
        |y, dst_row| {
            let fy = (y as i64 - origin_y) as usize;
            let overlay_row = overlay.row(fy);

            for x in x_start..x_end {
                let fx = (x as i64 - origin_x) as usize;
                let src = &overlay_row[fx * 4..fx * 4 + 4];

                let alpha = src[ALPHA_CHANNEL] as f32 / 255.0;
                if alpha <= 0.0 {
                    continue;
                }

                let effective = alpha * opacity;
                let dst_pixel = &mut dst_row[x * C..x * C + COLOR_CHANNELS];
                for (d, &s) in dst_pixel.iter_mut().zip(src[..COLOR_CHANNELS].iter()) {
                    *d = u8::from_f32(*d as f32 * (1.0 - effective) + s as f32 * effective);
                }
            }
        },
    );

    Ok(())
}
