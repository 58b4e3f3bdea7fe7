use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use inkfit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for image data types.
///
/// Send and Sync is required to process rows with rayon.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync {
    /// Convert a f32 value to the image data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

/// Represents an image with pixel data.
///
/// Pixels are stored row-major with `CHANNELS` interleaved values per pixel.
/// Each row occupies `stride` elements, which may be larger than
/// `width * CHANNELS` when the producer pads rows (e.g. camera buffers).
/// For `u8` images the stride is the number of bytes per row.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    stride: usize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from tightly packed pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use inkfit_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 4>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 4],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.stride(), 40);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        Self::with_stride(size, size.width * CHANNELS, data)
    }

    /// Create a new image from pixel data whose rows are `stride` elements apart.
    ///
    /// # Errors
    ///
    /// Returns an error if the stride is smaller than a packed row or the data
    /// length is not `height * stride`.
    ///
    /// # Examples
    ///
    /// ```
    /// use inkfit_image::{Image, ImageSize};
    ///
    /// // two pixels per row, padded to 12 bytes
    /// let size = ImageSize { width: 2, height: 3 };
    /// let image = Image::<u8, 4>::with_stride(size, 12, vec![0u8; 36]).unwrap();
    ///
    /// assert_eq!(image.stride(), 12);
    /// assert!(!image.is_contiguous());
    /// ```
    pub fn with_stride(size: ImageSize, stride: usize, data: Vec<T>) -> Result<Self, ImageError> {
        let packed = size.width * CHANNELS;
        if stride < packed {
            return Err(ImageError::InvalidStride(stride, packed));
        }

        if data.len() != size.height * stride {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.height * stride,
            ));
        }

        Ok(Self { size, stride, data })
    }

    /// Create a new image with the given size filled with `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use inkfit_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     0u8,
    /// ).unwrap();
    ///
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Create an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        size: ImageSize,
        mut f: impl FnMut(usize, usize) -> [T; CHANNELS],
    ) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        let mut data = Vec::with_capacity(size.width * size.height * CHANNELS);
        for y in 0..size.height {
            for x in 0..size.width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Number of elements between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Whether rows are packed without padding.
    pub fn is_contiguous(&self) -> bool {
        self.stride == self.size.width * CHANNELS
    }

    /// The raw storage, including any row padding.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The raw mutable storage, including any row padding.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The pixels of row `y`, without padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.size.width * CHANNELS]
    }

    /// Get the channels of the pixel at `(x, y)`.
    ///
    /// Returns `None` when the coordinate is outside the image.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let start = y * self.stride + x * CHANNELS;
        self.data.get(start..start + CHANNELS)
    }

    /// Get the mutable channels of the pixel at `(x, y)`.
    pub fn get_pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [T]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let start = y * self.stride + x * CHANNELS;
        self.data.get_mut(start..start + CHANNELS)
    }

    /// Get a single channel value of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel or the channel index is out of bounds.
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        self.get_pixel(x, y)
            .map(|px| px[ch])
            .ok_or(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ))
    }
}
