use hue_image::{ImageError, ImageSize};

/// A boxed error coming from an external collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error type for the colorize module.
#[derive(thiserror::Error, Debug)]
pub enum ColorizeError {
    /// The input image cannot be processed by the pipeline.
    #[error("Invalid input image: {0}")]
    ShapePrecondition(String),

    /// The luminance and chrominance planes do not have the same size.
    #[error("Luminance size {0} does not match the chrominance size {1}")]
    ShapeMismatch(ImageSize, ImageSize),

    /// The predictor returned a tensor with an unexpected shape.
    #[error("Predictor output has shape {0:?}, expected [1, 2, h, w] with h, w > 0")]
    PredictorOutput([usize; 4]),

    /// The predictor could not be loaded.
    #[error("Failed to load the predictor. {0}")]
    PredictorUnavailable(BoxError),

    /// The predictor failed while running inference.
    #[error("Predictor inference failed. {0}")]
    Inference(BoxError),

    /// The color transform could not be inverted.
    #[error("Color transform is numerically degenerate. {0}")]
    NumericDegenerate(ImageError),

    /// Error in an image operation.
    #[error("Image operation failed. {0}")]
    Image(ImageError),

    /// The data length does not match the requested tensor shape.
    #[error("Data length ({1}) does not match the tensor shape {0:?}")]
    InvalidTensorShape([usize; 4], usize),

    /// The host adapter failed to provide or store an image.
    #[error("Host adapter failed. {0}")]
    Host(BoxError),
}

impl From<ImageError> for ColorizeError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::SingularMatrix(_) => ColorizeError::NumericDegenerate(err),
            err => ColorizeError::Image(err),
        }
    }
}
