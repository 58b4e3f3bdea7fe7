use std::ops::Range;

use rayon::prelude::*;

use inkfit_image::Image;

/// Apply a function to each pixel of the image in parallel, by rows.
///
/// The closure receives the pixel coordinates `(x, y)` and the mutable
/// channels of that pixel. Row padding is never visited.
pub fn par_iter_rows_indexed<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    let (cols, stride) = (dst.cols(), dst.stride());
    if stride == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            row[..cols * C]
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, dst_pixel)| f(x, y, dst_pixel));
        });
}

/// Apply a function to a range of rows of the image in parallel.
///
/// The closure receives the row index and the row pixels without padding.
/// Rows outside the image are ignored.
pub fn par_iter_row_range<T, const C: usize>(
    dst: &mut Image<T, C>,
    rows: Range<usize>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    let (cols, stride, height) = (dst.cols(), dst.stride(), dst.rows());
    let end = rows.end.min(height);
    if stride == 0 || rows.start >= end {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .skip(rows.start)
        .take(end - rows.start)
        .for_each(|(y, row)| f(y, &mut row[..cols * C]));
}
