use argh::FromArgs;
use std::path::PathBuf;

use hue::colorize::{
    host::{colorize_layer, LayerSource},
    predictor::{U_SCALE, V_SCALE},
    ChromaPredictor, ColorizeConfig, ColorizeError, Device, PredictorSession, Tensor4,
};
use hue::image::{ops, Image, ImageSize, PixelBuffer};
use hue::imgproc::{color, interpolation::InterpolationMode, resize};
use hue::io::{DirectoryLayerSink, FileLayerSource};

#[derive(FromArgs)]
/// Colorize a grayscale image with the chrominance of a color reference
struct Args {
    /// path to the grayscale image to colorize
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the color reference image
    #[argh(option, short = 'r')]
    reference_path: PathBuf,

    /// directory where the colorized image is written
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// downscale factor applied to the reference chrominance
    #[argh(option, short = 'd', default = "4")]
    downscale: usize,

    /// use the first CUDA device if available
    #[argh(switch)]
    cuda: bool,
}

/// Build an RGB image from the first three channels, replicating gray inputs.
fn reference_rgb(pixels: &PixelBuffer) -> Result<Image<u8, 3>, ColorizeError> {
    let planes = match pixels.num_channels() {
        1 | 2 => {
            let gray = pixels.channel(0)?;
            [gray.clone(), gray.clone(), gray]
        }
        _ => [pixels.channel(0)?, pixels.channel(1)?, pixels.channel(2)?],
    };
    let [r, g, b] = &planes;
    Ok(Image::<u8, 1>::stack_channels([r, g, b])?)
}

/// Compute the reference chrominance at a reduced resolution as a predictor output tensor.
fn reference_chrominance(pixels: &PixelBuffer, downscale: usize) -> Result<Tensor4, ColorizeError> {
    let rgb = reference_rgb(pixels)?;

    let mut rgb_f32 = Image::from_size_val(rgb.size(), 0f32)?;
    ops::cast_and_scale(&rgb, &mut rgb_f32, 1.0 / 255.0)?;

    let mut yuv = Image::from_size_val(rgb.size(), 0f32)?;
    color::yuv_from_rgb(&rgb_f32, &mut yuv)?;

    let size = ImageSize {
        width: (rgb.width() / downscale.max(1)).max(1),
        height: (rgb.height() / downscale.max(1)).max(1),
    };
    let mut yuv_small = Image::from_size_val(size, 0f32)?;
    resize::resize_native(&yuv, &mut yuv_small, InterpolationMode::Bilinear)?;

    // undo the output scaling applied by the predictor adapter
    let u = yuv_small
        .channel(1)?
        .into_vec()
        .into_iter()
        .map(|x| x / U_SCALE);
    let v = yuv_small
        .channel(2)?
        .into_vec()
        .into_iter()
        .map(|x| x / V_SCALE);

    Tensor4::from_shape_vec([1, 2, size.height, size.width], u.chain(v).collect())
}

/// Replays a fixed chrominance map whatever the input luminance is.
struct ReferencePredictor {
    chroma: Tensor4,
}

impl ChromaPredictor for ReferencePredictor {
    fn forward(&self, _input: &Tensor4, _device: Device) -> Result<Tensor4, ColorizeError> {
        Ok(self.chroma.clone())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let reference = FileLayerSource::new(&args.reference_path).read_layer()?;
    let chroma = reference_chrominance(&reference, args.downscale)?;
    log::info!(
        "reference chrominance {:?} from {}",
        chroma.shape(),
        args.reference_path.display()
    );

    // the session falls back to the cpu if cuda is not available
    let device = if args.cuda {
        Device::Cuda(0)
    } else {
        Device::Cpu
    };

    let session = PredictorSession::new(
        move |_: Device| -> Result<_, ColorizeError> {
            let chroma = chroma.clone();
            Ok(ReferencePredictor { chroma })
        },
        ColorizeConfig::default().with_device(device),
    );

    let source = FileLayerSource::new(&args.image_path);
    log::info!("colorizing {}", source.path().display());
    let mut sink = DirectoryLayerSink::new(&args.output_dir)?;

    let name = colorize_layer(&session, &source, &mut sink)?;

    for path in sink.created() {
        println!("{name} -> {}", path.display());
    }

    Ok(())
}
