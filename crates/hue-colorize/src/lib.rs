#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// configuration of the colorization pipeline.
pub mod config;

/// execution device selection.
pub mod device;

/// Error types for the colorize module.
pub mod error;

/// contracts with the host application providing and receiving images.
pub mod host;

/// the end to end colorization pipeline.
pub mod pipeline;

/// adapter around the external chrominance predictor.
pub mod predictor;

/// lazily loaded predictor context.
pub mod session;

/// dense tensors exchanged with the predictor.
pub mod tensor;

/// predictors backed by [candle](https://crates.io/crates/candle-core) modules.
#[cfg(feature = "candle")]
pub mod candle;

pub use crate::config::ColorizeConfig;
pub use crate::device::Device;
pub use crate::error::ColorizeError;
pub use crate::pipeline::colorize;
pub use crate::predictor::{predict_chrominance, ChromaMap, ChromaPredictor};
pub use crate::session::{PredictorLoader, PredictorSession};
pub use crate::tensor::Tensor4;
