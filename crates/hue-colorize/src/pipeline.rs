//! The colorization pipeline.
//!
//! A grayscale image goes through a fixed sequence of stages:
//!
//! 1. the luminance is taken from the first channel of the input,
//! 2. the predictor estimates the chrominance at its native resolution,
//! 3. the chrominance is resampled to the input resolution,
//! 4. luminance and chrominance are stacked into a YUV image scaled to [0, 255],
//! 5. the YUV image is converted to RGB,
//! 6. the RGB values are clipped to [0, 255] and truncated to 8 bits.
//!
//! Clipping only happens in the last stage.

use hue_image::{ops, Image, ImageSize, PixelBuffer};
use hue_imgproc::{color, interpolation::InterpolationMode, resize};

use crate::{
    device::Device,
    error::ColorizeError,
    predictor::{predict_chrominance, ChromaMap, ChromaPredictor},
};

/// The largest number of channels accepted in an input buffer (gray, gray + alpha, RGB, RGBA).
pub const MAX_INPUT_CHANNELS: usize = 4;

/// Extract the luminance plane of an input buffer.
///
/// Only the first channel is used: the input is expected to be a grayscale image and any other
/// channel is ignored, including the color of RGB inputs.
///
/// # Errors
///
/// Returns [`ColorizeError::ShapePrecondition`] if the buffer has no pixels or an unsupported
/// number of channels.
pub fn extract_luminance(image: &PixelBuffer) -> Result<Image<u8, 1>, ColorizeError> {
    if image.size().is_empty() {
        return Err(ColorizeError::ShapePrecondition(format!(
            "image has no pixels: {}",
            image.size()
        )));
    }

    if image.num_channels() == 0 || image.num_channels() > MAX_INPUT_CHANNELS {
        return Err(ColorizeError::ShapePrecondition(format!(
            "expected 1 to {} channels, got {}",
            MAX_INPUT_CHANNELS,
            image.num_channels()
        )));
    }

    Ok(image.channel(0)?)
}

/// Resample both chrominance planes to the given size.
///
/// The resampling always runs; planes already at the target size are copied unchanged.
pub fn resample_chrominance(
    chroma: &ChromaMap,
    size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<ChromaMap, ColorizeError> {
    let mut u = Image::from_size_val(size, 0f32)?;
    let mut v = Image::from_size_val(size, 0f32)?;

    resize::resize_native(&chroma.u, &mut u, interpolation)?;
    resize::resize_native(&chroma.v, &mut v, interpolation)?;

    Ok(ChromaMap { u, v })
}

/// Stack the luminance in [0, 1] with the chrominance planes and scale the result by 255.
///
/// # Errors
///
/// Returns [`ColorizeError::ShapeMismatch`] if the planes do not have the same size.
pub fn recombine(
    luminance: &Image<f32, 1>,
    chroma: &ChromaMap,
) -> Result<Image<f32, 3>, ColorizeError> {
    for plane in [&chroma.u, &chroma.v] {
        if plane.size() != luminance.size() {
            return Err(ColorizeError::ShapeMismatch(luminance.size(), plane.size()));
        }
    }

    let yuv = Image::<f32, 1>::stack_channels([luminance, &chroma.u, &chroma.v])?;

    let mut yuv_scaled = Image::from_size_val(yuv.size(), 0f32)?;
    ops::cast_and_scale(&yuv, &mut yuv_scaled, 255.0)?;

    Ok(yuv_scaled)
}

/// Clip an RGB image to [0, 255] and truncate it to 8 bits.
pub fn clip_and_quantize(rgb: &Image<f32, 3>) -> Result<Image<u8, 3>, ColorizeError> {
    let data = rgb
        .as_slice()
        .iter()
        .map(|&x| x.clamp(0.0, 255.0) as u8)
        .collect();

    Ok(Image::new(rgb.size(), data)?)
}

/// Colorize a grayscale image.
///
/// # Arguments
///
/// * `image` - The input buffer with shape (H, W, C), C in 1..=4. Only the first channel is used.
/// * `predictor` - The pretrained chrominance predictor.
/// * `device` - The device the predictor runs on.
/// * `interpolation` - The interpolation used to resample the chrominance.
///
/// # Returns
///
/// An RGB image with shape (H, W, 3), whatever the predictor native resolution is.
///
/// # Example
///
/// ```
/// use hue_colorize::{colorize, ColorizeError, Device, Tensor4};
/// use hue_image::{ImageSize, PixelBuffer};
/// use hue_imgproc::interpolation::InterpolationMode;
///
/// // a predictor returning achromatic chrominance at half resolution
/// let predictor = |input: &Tensor4, _: Device| -> Result<Tensor4, ColorizeError> {
///     let [_, _, h, w] = input.shape();
///     Ok(Tensor4::from_shape_val([1, 2, h / 2, w / 2], 0.0))
/// };
///
/// let gray = PixelBuffer::new(ImageSize { width: 8, height: 6 }, 1, vec![200u8; 8 * 6]).unwrap();
/// let rgb = colorize(&gray, &predictor, Device::Cpu, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(rgb.size(), gray.size());
/// assert_eq!(rgb.num_channels(), 3);
/// ```
pub fn colorize<P>(
    image: &PixelBuffer,
    predictor: &P,
    device: Device,
    interpolation: InterpolationMode,
) -> Result<Image<u8, 3>, ColorizeError>
where
    P: ChromaPredictor + ?Sized,
{
    let luminance = extract_luminance(image)?;
    log::debug!(
        "extracted luminance {} from {} channels",
        luminance.size(),
        image.num_channels()
    );

    let chroma = predict_chrominance(&luminance, predictor, device)?;

    let chroma = resample_chrominance(&chroma, luminance.size(), interpolation)?;
    log::debug!("resampled chrominance to {}", chroma.size());

    let mut luminance_f32 = Image::from_size_val(luminance.size(), 0f32)?;
    ops::cast_and_scale(&luminance, &mut luminance_f32, 1.0 / 255.0)?;

    let yuv = recombine(&luminance_f32, &chroma)?;

    let mut rgb = Image::from_size_val(yuv.size(), 0f32)?;
    color::rgb_from_yuv(&yuv, &mut rgb)?;
    log::debug!("converted {} yuv composite to rgb", rgb.size());

    clip_and_quantize(&rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tensor4;
    use approx::assert_abs_diff_eq;

    fn zeros_predictor(input: &Tensor4, _device: Device) -> Result<Tensor4, ColorizeError> {
        let [_, _, h, w] = input.shape();
        Ok(Tensor4::from_shape_val([1, 2, h, w], 0.0))
    }

    #[test]
    fn extract_luminance_first_channel() -> Result<(), ColorizeError> {
        let image = PixelBuffer::new([2, 1].into(), 3, vec![10, 20, 30, 40, 50, 60])?;
        let luma = extract_luminance(&image)?;
        assert_eq!(luma.as_slice(), &[10, 40]);
        Ok(())
    }

    #[test]
    fn extract_luminance_preconditions() -> Result<(), ColorizeError> {
        let empty = PixelBuffer::new([0, 4].into(), 1, vec![])?;
        assert!(matches!(
            extract_luminance(&empty),
            Err(ColorizeError::ShapePrecondition(_))
        ));

        let too_many = PixelBuffer::new([1, 1].into(), 5, vec![0; 5])?;
        assert!(matches!(
            extract_luminance(&too_many),
            Err(ColorizeError::ShapePrecondition(_))
        ));

        let no_channels = PixelBuffer::new([3, 3].into(), 0, vec![])?;
        assert!(matches!(
            extract_luminance(&no_channels),
            Err(ColorizeError::ShapePrecondition(_))
        ));
        Ok(())
    }

    #[test]
    fn recombine_scales_once() -> Result<(), ColorizeError> {
        let luma = Image::<f32, 1>::new([2, 1].into(), vec![0.5, 1.0])?;
        let chroma = ChromaMap {
            u: Image::new([2, 1].into(), vec![0.1, -0.2])?,
            v: Image::new([2, 1].into(), vec![0.3, 0.0])?,
        };

        let yuv = recombine(&luma, &chroma)?;
        let expected = [127.5, 25.5, 76.5, 255.0, -51.0, 0.0];
        for (a, b) in yuv.as_slice().iter().zip(expected.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-4);
        }
        Ok(())
    }

    #[test]
    fn recombine_shape_mismatch() -> Result<(), ColorizeError> {
        let luma = Image::<f32, 1>::from_size_val([4, 4].into(), 0.5)?;
        let chroma = ChromaMap {
            u: Image::from_size_val([2, 2].into(), 0.0)?,
            v: Image::from_size_val([2, 2].into(), 0.0)?,
        };

        assert!(matches!(
            recombine(&luma, &chroma),
            Err(ColorizeError::ShapeMismatch(a, b)) if a == luma.size() && b == chroma.size()
        ));
        Ok(())
    }

    #[test]
    fn clipping_boundary() -> Result<(), ColorizeError> {
        // achromatic composites map to the same value in every channel
        let yuv = Image::<f32, 3>::new(
            [3, 1].into(),
            vec![-10.0, 0.0, 0.0, 300.0, 0.0, 0.0, 100.0, 0.0, 0.0],
        )?;
        let mut rgb = Image::from_size_val(yuv.size(), 0f32)?;
        color::rgb_from_yuv(&yuv, &mut rgb)?;

        let out = clip_and_quantize(&rgb)?;
        assert_eq!(&out.as_slice()[0..6], &[0, 0, 0, 255, 255, 255]);
        for &c in &out.as_slice()[6..9] {
            assert!((99..=100).contains(&c));
        }
        Ok(())
    }

    #[test]
    fn clip_truncates() -> Result<(), ColorizeError> {
        let rgb = Image::<f32, 3>::new([1, 1].into(), vec![12.9, 254.99, -0.5])?;
        assert_eq!(clip_and_quantize(&rgb)?.as_slice(), &[12, 254, 0]);
        Ok(())
    }

    #[test]
    fn resample_identity() -> Result<(), ColorizeError> {
        let chroma = ChromaMap {
            u: Image::new([2, 2].into(), vec![0.1, 0.2, 0.3, 0.4])?,
            v: Image::new([2, 2].into(), vec![-0.1, -0.2, -0.3, -0.4])?,
        };

        let resampled = resample_chrominance(&chroma, chroma.size(), InterpolationMode::Bilinear)?;
        assert_eq!(resampled, chroma);
        Ok(())
    }

    #[test]
    fn gray_end_to_end() -> Result<(), ColorizeError> {
        let image = PixelBuffer::new([4, 4].into(), 1, vec![128; 16])?;
        let rgb = colorize(
            &image,
            &zeros_predictor,
            Device::Cpu,
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(rgb.size(), image.size());
        for &c in rgb.as_slice() {
            assert!((126..=130).contains(&c), "unexpected channel value {c}");
        }
        Ok(())
    }

    #[test]
    fn shape_invariance() -> Result<(), ColorizeError> {
        for (pw, ph) in [(1, 1), (3, 2), (16, 12), (40, 40)] {
            let predictor = move |_: &Tensor4, _: Device| -> Result<Tensor4, ColorizeError> {
                Ok(Tensor4::from_shape_val([1, 2, ph, pw], 0.25))
            };

            let image = PixelBuffer::new([13, 7].into(), 4, vec![90; 13 * 7 * 4])?;
            let rgb = colorize(&image, &predictor, Device::Cpu, InterpolationMode::Bilinear)?;

            assert_eq!(rgb.size(), image.size());
            assert_eq!(rgb.num_channels(), 3);
        }
        Ok(())
    }
}
