/// The execution context a predictor runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    /// The default execution context, always available.
    #[default]
    Cpu,
    /// A CUDA accelerator with the given ordinal.
    Cuda(usize),
}

impl Device {
    /// Request the first CUDA device, falling back to the CPU if it is unavailable.
    pub fn cuda_if_available() -> Device {
        Device::Cuda(0).resolve()
    }

    /// Whether the device is an accelerator.
    pub fn is_accelerator(&self) -> bool {
        matches!(self, Device::Cuda(_))
    }

    /// Resolve the requested device against the accelerators compiled into this build.
    ///
    /// The CPU is returned when the requested accelerator is not usable.
    pub fn resolve(self) -> Device {
        self.resolve_with(accelerator_available)
    }

    /// Resolve the requested device using a custom availability probe.
    ///
    /// # Example
    ///
    /// ```
    /// use hue_colorize::Device;
    ///
    /// assert_eq!(Device::Cuda(1).resolve_with(|ordinal| ordinal == 1), Device::Cuda(1));
    /// assert_eq!(Device::Cuda(0).resolve_with(|_| false), Device::Cpu);
    /// ```
    pub fn resolve_with(self, available: impl Fn(usize) -> bool) -> Device {
        match self {
            Device::Cpu => Device::Cpu,
            Device::Cuda(ordinal) => {
                if available(ordinal) {
                    self
                } else {
                    log::warn!("Failed to use CUDA device {ordinal}, using CPU instead");
                    Device::Cpu
                }
            }
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
        }
    }
}

#[cfg(feature = "candle")]
fn accelerator_available(ordinal: usize) -> bool {
    crate::candle::cuda_device_available(ordinal)
}

#[cfg(not(feature = "candle"))]
fn accelerator_available(_ordinal: usize) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::Device;

    #[test]
    fn resolve_cpu() {
        assert_eq!(Device::Cpu.resolve_with(|_| true), Device::Cpu);
        assert_eq!(Device::Cpu.resolve(), Device::Cpu);
    }

    #[test]
    fn resolve_fallback() {
        assert_eq!(Device::Cuda(3).resolve_with(|o| o < 2), Device::Cpu);
        assert_eq!(Device::Cuda(1).resolve_with(|o| o < 2), Device::Cuda(1));
    }

    #[cfg(not(feature = "candle"))]
    #[test]
    fn resolve_without_accelerators() {
        assert_eq!(Device::cuda_if_available(), Device::Cpu);
    }

    #[test]
    fn display() {
        assert_eq!(Device::Cpu.to_string(), "cpu");
        assert_eq!(Device::Cuda(2).to_string(), "cuda:2");
        assert!(Device::Cuda(0).is_accelerator());
    }
}
