use std::path::Path;

use inkfit_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGBA.
///
/// Any format supported by the `image` crate is accepted. Images without an
/// alpha channel are expanded with a fully opaque alpha, so the result always
/// carries 3 color channels plus alpha.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// Returns an error if the file is missing or cannot be decoded.
pub fn read_image_rgba8(file_path: impl AsRef<Path>) -> Result<Image<u8, 4>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {} as {:?} ({}x{})",
        file_path.display(),
        img.color(),
        img.width(),
        img.height()
    );

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgba8().into_raw())?)
}

/// Reads the tattoo overlay from the given file path.
///
/// Same as [`read_image_rgba8`], but an image with a zero dimension is
/// rejected since there would be nothing to composite.
///
/// # Example
///
/// ```no_run
/// use inkfit_io::functional as F;
///
/// let overlay = F::read_overlay_rgba8("images/rose.png").unwrap();
/// assert_eq!(overlay.num_channels(), 4);
/// ```
pub fn read_overlay_rgba8(file_path: impl AsRef<Path>) -> Result<Image<u8, 4>, IoError> {
    let overlay = read_image_rgba8(file_path.as_ref())?;

    if overlay.size().is_empty() {
        return Err(IoError::EmptyImage(file_path.as_ref().to_owned()));
    }

    Ok(overlay)
}

/// Writes an RGBA image to the given file path.
///
/// The format is picked from the file extension. Row padding is dropped.
///
/// # Arguments
///
/// * `file_path` - The destination path, e.g. `frame_0001.png`.
/// * `image` - The image to write.
pub fn write_image_rgba8(file_path: impl AsRef<Path>, image: &Image<u8, 4>) -> Result<(), IoError> {
    let size = image.size();
    let (width, height) = match (u32::try_from(size.width), u32::try_from(size.height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(IoError::ImageTooLarge(size)),
    };

    let mut packed = Vec::with_capacity(size.width * size.height * 4);
    for y in 0..size.height {
        packed.extend_from_slice(image.row(y));
    }

    image::save_buffer(
        file_path,
        &packed,
        width,
        height,
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}
