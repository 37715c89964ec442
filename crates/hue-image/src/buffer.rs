use crate::{error::ImageError, image::ImageSize, Image};

/// A dense 8-bit pixel buffer whose channel count is only known at runtime.
///
/// This is the representation exchanged with host applications, where the number of bytes per
/// pixel depends on the layer type (e.g. gray, gray + alpha, RGB or RGBA). The data is stored
/// contiguously in row-major order with shape (H, W, C).
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    size: ImageSize,
    num_channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new pixel buffer from raw row-major data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length does not match `height * width * num_channels`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_image::{ImageSize, PixelBuffer};
    ///
    /// let buffer = PixelBuffer::new(
    ///     ImageSize {
    ///         width: 2,
    ///         height: 2,
    ///     },
    ///     2,
    ///     vec![0u8; 2 * 2 * 2],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(buffer.num_channels(), 2);
    /// ```
    pub fn new(size: ImageSize, num_channels: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        if data.len() != size.area() * num_channels {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.area() * num_channels,
            ));
        }

        Ok(Self {
            size,
            num_channels,
            data,
        })
    }

    /// Get the size of the buffer in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the buffer in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the buffer in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels (bytes per pixel).
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Get the raw pixel data.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return the raw pixel data.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Extract a single channel as an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel index is out of bounds.
    pub fn channel(&self, channel: usize) -> Result<Image<u8, 1>, ImageError> {
        if channel >= self.num_channels {
            return Err(ImageError::ChannelIndexOutOfBounds(
                channel,
                self.num_channels,
            ));
        }

        let data = self
            .data
            .chunks_exact(self.num_channels)
            .map(|pixel| pixel[channel])
            .collect();

        Image::new(self.size, data)
    }
}

impl<const C: usize> From<Image<u8, C>> for PixelBuffer {
    fn from(image: Image<u8, C>) -> Self {
        Self {
            size: image.size(),
            num_channels: C,
            data: image.into_vec(),
        }
    }
}
