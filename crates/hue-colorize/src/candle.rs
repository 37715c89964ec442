use candle_core::{DType, Module, Tensor};

use crate::{device::Device, error::ColorizeError, predictor::ChromaPredictor, tensor::Tensor4};

fn inference_error(err: candle_core::Error) -> ColorizeError {
    ColorizeError::Inference(Box::new(err))
}

/// Whether a CUDA device with the given ordinal can be created.
pub fn cuda_device_available(ordinal: usize) -> bool {
    candle_core::utils::cuda_is_available() && candle_core::Device::new_cuda(ordinal).is_ok()
}

/// Map a device onto the equivalent candle device.
///
/// # Errors
///
/// Returns [`ColorizeError::PredictorUnavailable`] if the CUDA device cannot be created.
pub fn candle_device(device: Device) -> Result<candle_core::Device, ColorizeError> {
    match device {
        Device::Cpu => Ok(candle_core::Device::Cpu),
        Device::Cuda(ordinal) => candle_core::Device::new_cuda(ordinal)
            .map_err(|e| ColorizeError::PredictorUnavailable(Box::new(e))),
    }
}

/// A chrominance predictor running a candle module.
///
/// The module receives the `(1, 1, H, W)` luminance tensor and must return a `(1, 2, h, w)`
/// chrominance tensor of any float dtype.
pub struct CandlePredictor<M> {
    model: M,
    device: candle_core::Device,
}

impl<M: Module + Send + Sync> CandlePredictor<M> {
    /// Wrap a module whose weights live on `device`.
    pub fn new(model: M, device: Device) -> Result<Self, ColorizeError> {
        Ok(Self {
            model,
            device: candle_device(device)?,
        })
    }

    /// The candle device the module runs on.
    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }
}

impl<M: Module + Send + Sync> ChromaPredictor for CandlePredictor<M> {
    fn forward(&self, input: &Tensor4, _device: Device) -> Result<Tensor4, ColorizeError> {
        let x = Tensor::from_slice(input.as_slice(), &input.shape(), &self.device)
            .map_err(inference_error)?;

        let y = self.model.forward(&x).map_err(inference_error)?;

        let (n, c, h, w) = y.dims4().map_err(inference_error)?;
        let data = y
            .to_dtype(DType::F32)
            .and_then(|y| y.flatten_all())
            .and_then(|y| y.to_vec1::<f32>())
            .map_err(inference_error)?;

        Tensor4::from_shape_vec([n, c, h, w], data)
    }
}

#[cfg(test)]
mod tests {
    use super::CandlePredictor;
    use crate::{predictor::predict_chrominance, ColorizeError, Device};
    use approx::assert_abs_diff_eq;
    use candle_core::Tensor;
    use hue_image::Image;

    #[test]
    fn candle_module_predictor() -> Result<(), ColorizeError> {
        // duplicates the luminance into both chrominance channels
        let model = |x: &Tensor| -> candle_core::Result<Tensor> { Tensor::cat(&[x, x], 1) };
        let predictor = CandlePredictor::new(model, Device::Cpu)?;
        assert!(predictor.device().is_cpu());

        let luma = Image::<u8, 1>::new([2, 1].into(), vec![0, 255])?;
        let chroma = predict_chrominance(&luma, &predictor, Device::Cpu)?;

        let expected_u = [-0.5 * 0.436, 0.5 * 0.436];
        let expected_v = [-0.5 * 0.615, 0.5 * 0.615];
        for (a, b) in chroma.u.as_slice().iter().zip(expected_u.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
        for (a, b) in chroma.v.as_slice().iter().zip(expected_v.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
        Ok(())
    }
}
