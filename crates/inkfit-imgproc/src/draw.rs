use inkfit_image::Image;

/// Helper function to set a pixel's color, ignoring coordinates outside the image.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x < 0 || y < 0 {
        return;
    }
    if let Some(px) = img.get_pixel_mut(x as usize, y as usize) {
        px.copy_from_slice(&color);
    }
}

/// Clips the segment `p0 -> p1` to the box `[lo, hi]` (Liang-Barsky).
///
/// Returns `None` when no part of the segment lies inside the box.
fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    lo: (f64, f64),
    hi: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    let edges = [
        (-dx, p0.0 - lo.0),
        (dx, hi.0 - p0.0),
        (-dy, p0.1 - lo.1),
        (dy, hi.1 - p0.1),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // parallel to this edge and outside of it
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let clamp = |x: f64, y: f64| (x.clamp(lo.0, hi.0), y.clamp(lo.1, hi.1));
    Some((
        clamp(p0.0 + t0 * dx, p0.1 + t0 * dy),
        clamp(p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

/// Draws a line on an image inplace using Bresenham's line algorithm.
///
/// The segment is clipped to the image, grown by the brush half width, before
/// it is rasterized, so the cost is bounded by the image size whatever the
/// endpoints are.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
/// * `thickness` - The thickness of the line, approximated with a square brush.
pub fn draw_line<const C: usize>(
    img: &mut Image<u8, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [u8; C],
    thickness: usize,
) {
    if img.cols() == 0 || img.rows() == 0 {
        return;
    }

    let half = (thickness / 2).min(img.cols().max(img.rows())) as i64;
    let lo = (-half as f64, -half as f64);
    let hi = (
        (img.cols() as i64 - 1 + half) as f64,
        (img.rows() as i64 - 1 + half) as f64,
    );

    let Some((c0, c1)) = clip_segment(
        (p0.0 as f64, p0.1 as f64),
        (p1.0 as f64, p1.1 as f64),
        lo,
        hi,
    ) else {
        return;
    };

    let (mut x0, mut y0) = (c0.0.round() as i64, c0.1.round() as i64);
    let (x1, y1) = (c1.0.round() as i64, c1.1.round() as i64);

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    loop {
        for j in -half..=half {
            for i in -half..=half {
                set_pixel(img, x0 + i, y0 + j, color);
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws a filled circle on an image inplace.
///
/// Parts of the circle outside the image are clipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `center` - The center of the circle as (x, y).
/// * `radius` - The radius in pixels.
/// * `color` - The fill color.
pub fn draw_filled_circle<const C: usize>(
    img: &mut Image<u8, C>,
    center: (i64, i64),
    radius: i64,
    color: [u8; C],
) {
    if radius < 0 {
        return;
    }

    let (cx, cy) = center;
    let r2 = radius * radius;

    let y_start = (cy - radius).max(0);
    let y_end = (cy + radius).min(img.rows() as i64 - 1);

    for y in y_start..=y_end {
        let dy = y - cy;
        // half width of the horizontal span at this row
        let span = ((r2 - dy * dy) as f64).sqrt() as i64;
        let x_start = (cx - span).max(0);
        let x_end = (cx + span).min(img.cols() as i64 - 1);
        for x in x_start..=x_end {
            set_pixel(img, x, y, color);
        }
    }
}
