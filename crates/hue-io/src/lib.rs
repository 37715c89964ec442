#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the io module.
pub mod error;

/// High-level functions to read and write image files.
pub mod functional;

/// Host adapters backed by the file system.
pub mod host;

pub use crate::error::IoError;
pub use crate::host::{DirectoryLayerSink, FileLayerSource};
