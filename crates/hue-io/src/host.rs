use std::path::{Path, PathBuf};

use hue_colorize::{
    host::{LayerSink, LayerSource},
    ColorizeError,
};
use hue_image::{Image, PixelBuffer};

use crate::{error::IoError, functional};

fn host_error(err: IoError) -> ColorizeError {
    ColorizeError::Host(Box::new(err))
}

/// A layer read from an image file.
///
/// The layer is named after the file stem.
pub struct FileLayerSource {
    path: PathBuf,
    name: String,
}

impl FileLayerSource {
    /// Create a layer source for the given image file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_owned();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "layer".to_string());
        Self { path, name }
    }

    /// The path of the image file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LayerSource for FileLayerSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_layer(&self) -> Result<PixelBuffer, ColorizeError> {
        functional::read_image_any(&self.path).map_err(host_error)
    }
}

/// Writes every created layer as a PNG file into a directory.
///
/// Existing files are never overwritten: a layer whose name is taken gets a numeric suffix.
pub struct DirectoryLayerSink {
    dir: PathBuf,
    created: Vec<PathBuf>,
}

impl DirectoryLayerSink {
    /// Create a sink writing into `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, IoError> {
        let dir = dir.as_ref().to_owned();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            created: Vec::new(),
        })
    }

    /// The files created so far, in creation order.
    pub fn created(&self) -> &[PathBuf] {
        &self.created
    }

    fn available_path(&self, name: &str) -> PathBuf {
        let mut path = self.dir.join(format!("{name}.png"));
        let mut index = 1;
        while path.exists() {
            path = self.dir.join(format!("{name}_{index}.png"));
            index += 1;
        }
        path
    }
}

impl LayerSink for DirectoryLayerSink {
    fn create_layer(&mut self, name: &str, image: &Image<u8, 3>) -> Result<(), ColorizeError> {
        let path = self.available_path(name);
        functional::write_image_png_rgb8(&path, image).map_err(host_error)?;

        log::debug!("wrote {}", path.display());
        self.created.push(path);

        Ok(())
    }
}
