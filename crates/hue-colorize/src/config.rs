use hue_imgproc::interpolation::InterpolationMode;

use crate::device::Device;

/// Configuration of a colorization session.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorizeConfig {
    /// The device requested for the predictor.
    pub device: Device,
    /// The interpolation used to bring the chrominance to the source resolution.
    pub interpolation: InterpolationMode,
    /// Suffix appended to the source name when creating the colorized output.
    pub output_suffix: String,
}

impl Default for ColorizeConfig {
    fn default() -> Self {
        Self {
            device: Device::Cpu,
            interpolation: InterpolationMode::Bilinear,
            output_suffix: "_colored".to_string(),
        }
    }
}

impl ColorizeConfig {
    /// Set the device requested for the predictor.
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Set the interpolation used to resample the chrominance.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the suffix of the colorized output name.
    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// The name of the colorized output for a given source name.
    pub fn output_name(&self, source_name: &str) -> String {
        format!("{}{}", source_name, self.output_suffix)
    }
}
