use std::sync::{Arc, Mutex, PoisonError};

use hue_image::{Image, PixelBuffer};

use crate::{
    config::ColorizeConfig,
    device::Device,
    error::{BoxError, ColorizeError},
    pipeline,
    predictor::ChromaPredictor,
};

/// Acquires a pretrained predictor for a device.
///
/// Implementations may download weights or initialize accelerator state; the session calls
/// [`PredictorLoader::load`] at most once per successful load.
pub trait PredictorLoader: Send + Sync {
    /// The predictor produced by the loader.
    type Predictor: ChromaPredictor;

    /// Load the predictor on the given device.
    fn load(&self, device: Device) -> Result<Self::Predictor, BoxError>;
}

impl<F, P, E> PredictorLoader for F
where
    F: Fn(Device) -> Result<P, E> + Send + Sync,
    P: ChromaPredictor,
    E: Into<BoxError>,
{
    type Predictor = P;

    fn load(&self, device: Device) -> Result<P, BoxError> {
        self(device).map_err(Into::into)
    }
}

/// A colorization session owning a lazily loaded predictor.
///
/// The device is resolved once when the session is created and stays fixed for the lifetime of
/// the predictor. The predictor is loaded on first use and released when the session is dropped.
/// Loading is serialized, so concurrent callers never trigger more than one load; inference runs
/// on a shared handle without holding the lock.
///
/// # Example
///
/// ```
/// use hue_colorize::{ColorizeConfig, ColorizeError, Device, PredictorSession, Tensor4};
/// use hue_image::{ImageSize, PixelBuffer};
///
/// let session = PredictorSession::new(
///     |_device: Device| -> Result<_, ColorizeError> {
///         Ok(|input: &Tensor4, _: Device| -> Result<Tensor4, ColorizeError> {
///             let [_, _, h, w] = input.shape();
///             Ok(Tensor4::from_shape_val([1, 2, h, w], 0.0))
///         })
///     },
///     ColorizeConfig::default(),
/// );
///
/// assert!(!session.is_loaded());
///
/// let gray = PixelBuffer::new(ImageSize { width: 4, height: 4 }, 1, vec![64u8; 16]).unwrap();
/// let rgb = session.colorize(&gray).unwrap();
///
/// assert!(session.is_loaded());
/// assert_eq!(rgb.size(), gray.size());
/// ```
pub struct PredictorSession<L: PredictorLoader> {
    loader: L,
    config: ColorizeConfig,
    device: Device,
    predictor: Mutex<Option<Arc<L::Predictor>>>,
}

impl<L: PredictorLoader> PredictorSession<L> {
    /// Create a new session.
    ///
    /// The requested device is resolved immediately, falling back to the CPU if the accelerator
    /// is not available. No predictor is loaded until the first call that needs it.
    pub fn new(loader: L, config: ColorizeConfig) -> Self {
        let device = config.device.resolve();
        log::debug!("created colorization session on {device}");
        Self {
            loader,
            config,
            device,
            predictor: Mutex::new(None),
        }
    }

    /// The device the predictor runs on.
    pub fn device(&self) -> Device {
        self.device
    }

    /// The session configuration.
    pub fn config(&self) -> &ColorizeConfig {
        &self.config
    }

    /// Whether the predictor has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.predictor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Get the predictor, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::PredictorUnavailable`] if loading fails. Nothing is cached in
    /// that case and the next call tries again, including after a loader that panicked.
    pub fn predictor(&self) -> Result<Arc<L::Predictor>, ColorizeError> {
        // the slot is only written after a successful load, so a poisoned guard is still valid
        let mut slot = self
            .predictor
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(predictor) = slot.as_ref() {
            return Ok(predictor.clone());
        }

        log::info!("loading chrominance predictor on {}", self.device);
        let predictor = Arc::new(
            self.loader
                .load(self.device)
                .map_err(ColorizeError::PredictorUnavailable)?,
        );
        *slot = Some(predictor.clone());

        Ok(predictor)
    }

    /// Colorize a grayscale image with the session predictor.
    pub fn colorize(&self, image: &PixelBuffer) -> Result<Image<u8, 3>, ColorizeError> {
        let predictor = self.predictor()?;
        pipeline::colorize(
            image,
            predictor.as_ref(),
            self.device,
            self.config.interpolation,
        )
    }
}
