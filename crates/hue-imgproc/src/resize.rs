use crate::interpolation::{grid::resample_grid, interpolate_pixel, InterpolationMode};
use crate::parallel;
use hue_image::{Image, ImageError};

/// Resize an image to a new size.
///
/// The function resizes an image to the size of `dst` using the specified interpolation mode.
/// Pixel centers of the source and destination are aligned and samples falling outside the
/// source grid are clamped to the nearest edge. When both images already have the same size the
/// source is copied unchanged.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if either image has no pixels.
///
/// # Example
///
/// ```
/// use hue_image::{Image, ImageSize};
/// use hue_imgproc::interpolation::InterpolationMode;
/// use hue_imgproc::resize::resize_native;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.size().is_empty() || dst.size().is_empty() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    if src.size() == dst.size() {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    // source coordinates for every destination column and row
    let map_x = resample_grid(src.width(), dst.width());
    let map_y = resample_grid(src.height(), dst.height());

    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |x, y, dst_pixel| {
        dst_pixel.copy_from_slice(&interpolate_pixel(src, x, y, interpolation));
    });

    Ok(())
}
