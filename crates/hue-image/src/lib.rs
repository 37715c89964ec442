#![deny(missing_docs)]
//! Image types and traits for generating and manipulating images

/// image representation for computer vision purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// host-facing pixel buffers with a runtime channel count.
pub mod buffer;

/// image basic operations.
pub mod ops;

pub use crate::buffer::PixelBuffer;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
