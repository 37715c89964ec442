use std::path::Path;

use hue_image::{Image, ImageSize, PixelBuffer};

use crate::error::IoError;

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate. 8-bit
/// grayscale, grayscale with alpha, RGB and RGBA images keep their channels; any other pixel
/// format is converted to the 8-bit variant with the same channel layout.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A buffer with shape (H, W, C) and C in 1..=4.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<PixelBuffer, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let color = img.color();
    let (num_channels, data) = match (color.has_color(), color.has_alpha()) {
        (false, false) => (1, img.into_luma8().into_raw()),
        (false, true) => (2, img.into_luma_alpha8().into_raw()),
        (true, false) => (3, img.into_rgb8().into_raw()),
        (true, true) => (4, img.into_rgba8().into_raw()),
    };

    log::debug!(
        "read {} {:?} image from {}",
        size,
        color,
        file_path.display()
    );

    Ok(PixelBuffer::new(size, num_channels, data)?)
}

/// Writes an RGB image to the given file path as PNG.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG image.
/// * `image` - The image with shape (H, W, 3).
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let (width, height) = (image.width(), image.height());
    let too_large = || IoError::ImageTooLarge(width, height);

    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        u32::try_from(width).map_err(|_| too_large())?,
        u32::try_from(height).map_err(|_| too_large())?,
        image::ExtendedColorType::Rgb8,
        image::ImageFormat::Png,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_image_any, write_image_png_rgb8};
    use crate::error::IoError;
    use hue_image::Image;

    #[test]
    fn read_missing_file() {
        assert!(matches!(
            read_image_any("does/not/exist.png"),
            Err(IoError::FileDoesNotExist(_))
        ));
    }

    #[test]
    fn write_read_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");

        let image = Image::<u8, 3>::new([3, 2].into(), (0..18).map(|x| x * 10).collect())?;
        write_image_png_rgb8(&file_path, &image)?;

        let pixels = read_image_any(&file_path)?;
        assert_eq!(pixels.size(), image.size());
        assert_eq!(pixels.num_channels(), 3);
        assert_eq!(pixels.as_slice(), image.as_slice());
        Ok(())
    }

    #[test]
    fn read_gray_keeps_one_channel() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        image::save_buffer(
            &file_path,
            &[0, 64, 128, 255],
            2,
            2,
            image::ExtendedColorType::L8,
        )?;

        let pixels = read_image_any(&file_path)?;
        assert_eq!(pixels.num_channels(), 1);
        assert_eq!(pixels.as_slice(), &[0, 64, 128, 255]);
        Ok(())
    }

    #[test]
    fn read_gray16_converts_to_8bit() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray16.png");

        let buffer = image::ImageBuffer::<image::Luma<u16>, _>::from_raw(2, 1, vec![0u16, 65535])
            .ok_or(IoError::ImageTooLarge(2, 1))?;
        buffer.save(&file_path)?;

        let pixels = read_image_any(&file_path)?;
        assert_eq!(pixels.num_channels(), 1);
        assert_eq!(pixels.as_slice(), &[0, 255]);
        Ok(())
    }
}
