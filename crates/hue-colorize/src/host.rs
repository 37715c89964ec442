use hue_image::{Image, PixelBuffer};

use crate::{
    error::ColorizeError,
    session::{PredictorLoader, PredictorSession},
};

/// A host layer providing the pixels to colorize.
pub trait LayerSource {
    /// The name of the layer.
    fn name(&self) -> &str;

    /// Read the layer pixels as a contiguous row-major buffer.
    fn read_layer(&self) -> Result<PixelBuffer, ColorizeError>;
}

/// A host receiving colorized results.
///
/// Every call creates a new output: calling it twice with the same name creates two outputs.
pub trait LayerSink {
    /// Create a new RGB layer with the given name.
    fn create_layer(&mut self, name: &str, image: &Image<u8, 3>) -> Result<(), ColorizeError>;
}

/// Colorize a host layer and hand the result back to the host.
///
/// The output is named after the source with the session output suffix appended.
///
/// # Returns
///
/// The name of the created output.
pub fn colorize_layer<L, S, K>(
    session: &PredictorSession<L>,
    source: &S,
    sink: &mut K,
) -> Result<String, ColorizeError>
where
    L: PredictorLoader,
    S: LayerSource + ?Sized,
    K: LayerSink + ?Sized,
{
    log::info!("Coloring {}...", source.name());

    let pixels = source.read_layer()?;
    let rgb = session.colorize(&pixels)?;

    let name = session.config().output_name(source.name());
    sink.create_layer(&name, &rgb)?;

    log::info!("created {} ({})", name, rgb.size());

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::{colorize_layer, LayerSink, LayerSource};
    use crate::{ColorizeConfig, ColorizeError, Device, PredictorSession, Tensor4};
    use hue_image::{Image, PixelBuffer};

    struct MemorySource(PixelBuffer);

    impl LayerSource for MemorySource {
        fn name(&self) -> &str {
            "Background"
        }

        fn read_layer(&self) -> Result<PixelBuffer, ColorizeError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct MemorySink(Vec<(String, Image<u8, 3>)>);

    impl LayerSink for MemorySink {
        fn create_layer(&mut self, name: &str, image: &Image<u8, 3>) -> Result<(), ColorizeError> {
            self.0.push((name.to_string(), image.clone()));
            Ok(())
        }
    }

    fn zeros_predictor(input: &Tensor4, _device: Device) -> Result<Tensor4, ColorizeError> {
        let [_, _, h, w] = input.shape();
        Ok(Tensor4::from_shape_val([1, 2, h, w], 0.0))
    }

    #[test]
    fn colorize_layer_creates_output() -> Result<(), ColorizeError> {
        let session = PredictorSession::new(
            |_: Device| -> Result<_, ColorizeError> { Ok(zeros_predictor) },
            ColorizeConfig::default(),
        );

        let source = MemorySource(PixelBuffer::new([3, 2].into(), 1, vec![255; 6])?);
        let mut sink = MemorySink::default();

        let name = colorize_layer(&session, &source, &mut sink)?;
        assert_eq!(name, "Background_colored");

        colorize_layer(&session, &source, &mut sink)?;
        assert_eq!(sink.0.len(), 2);

        let (_, rgb) = &sink.0[0];
        assert_eq!(rgb.size(), source.0.size());
        assert!(rgb.as_slice().iter().all(|&c| c >= 253));
        Ok(())
    }
}
