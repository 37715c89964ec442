use hue_image::{ops, Image, ImageSize};

use crate::{device::Device, error::ColorizeError, tensor::Tensor4};

/// Scale of the first predicted channel, the bound of U under the YUV transform.
pub const U_SCALE: f32 = 0.436;

/// Scale of the second predicted channel, the bound of V under the YUV transform.
pub const V_SCALE: f32 = 0.615;

/// A pretrained model mapping luminance to chrominance.
///
/// The predictor receives a `(1, 1, H, W)` tensor holding the luminance scaled to `[0, 1]` and
/// re-centered to `[-0.5, 0.5]`, and returns a `(1, 2, h, w)` tensor with the normalized U and
/// V channels at its native output resolution, which may differ from `(H, W)`.
///
/// Inference must not mutate the predictor, so a single instance can serve concurrent calls.
pub trait ChromaPredictor: Send + Sync {
    /// Run the predictor on a normalized luminance tensor.
    fn forward(&self, input: &Tensor4, device: Device) -> Result<Tensor4, ColorizeError>;
}

impl<F> ChromaPredictor for F
where
    F: Fn(&Tensor4, Device) -> Result<Tensor4, ColorizeError> + Send + Sync,
{
    fn forward(&self, input: &Tensor4, device: Device) -> Result<Tensor4, ColorizeError> {
        self(input, device)
    }
}

/// The chrominance planes produced by a predictor, already scaled to the YUV ranges.
#[derive(Clone, Debug, PartialEq)]
pub struct ChromaMap {
    /// The U plane.
    pub u: Image<f32, 1>,
    /// The V plane.
    pub v: Image<f32, 1>,
}

impl ChromaMap {
    /// The resolution of the chrominance planes.
    pub fn size(&self) -> ImageSize {
        self.u.size()
    }
}

/// Normalize a luminance image into the predictor input tensor.
///
/// The values are divided by 255, re-centered by subtracting 0.5 and given a leading batch and
/// channel dimension, producing a `(1, 1, H, W)` tensor.
pub fn normalize_luminance(luminance: &Image<u8, 1>) -> Result<Tensor4, ColorizeError> {
    let mut luminance_f32 = Image::from_size_val(luminance.size(), 0f32)?;
    ops::cast_and_scale(luminance, &mut luminance_f32, 1.0 / 255.0)?;

    let data = luminance_f32
        .into_vec()
        .into_iter()
        .map(|x| x - 0.5)
        .collect();

    Tensor4::from_shape_vec([1, 1, luminance.height(), luminance.width()], data)
}

/// Predict the chrominance of a luminance image.
///
/// # Arguments
///
/// * `luminance` - The 8-bit luminance plane with shape (H, W).
/// * `predictor` - The pretrained chrominance predictor.
/// * `device` - The device the predictor runs on.
///
/// # Returns
///
/// The U and V planes at the predictor native resolution, with U multiplied by
/// [`U_SCALE`] and V by [`V_SCALE`].
///
/// # Errors
///
/// Returns [`ColorizeError::PredictorOutput`] if the predictor does not return a single
/// non-empty two channel map, or any error raised by the predictor itself.
pub fn predict_chrominance<P>(
    luminance: &Image<u8, 1>,
    predictor: &P,
    device: Device,
) -> Result<ChromaMap, ColorizeError>
where
    P: ChromaPredictor + ?Sized,
{
    let input = normalize_luminance(luminance)?;

    let output = predictor.forward(&input, device)?;

    let shape = output.shape();
    let [n, c, h, w] = shape;
    if n != 1 || c != 2 || h == 0 || w == 0 {
        return Err(ColorizeError::PredictorOutput(shape));
    }

    log::debug!(
        "predicted chrominance at {}x{} for luminance {}",
        w,
        h,
        luminance.size()
    );

    let size = ImageSize {
        width: w,
        height: h,
    };

    let scale_plane = |channel: usize, scale: f32| -> Result<Image<f32, 1>, ColorizeError> {
        let plane = output
            .plane(0, channel)
            .ok_or(ColorizeError::PredictorOutput(shape))?;
        Ok(Image::new(size, plane.iter().map(|x| x * scale).collect())?)
    };

    Ok(ChromaMap {
        u: scale_plane(0, U_SCALE)?,
        v: scale_plane(1, V_SCALE)?,
    })
}
