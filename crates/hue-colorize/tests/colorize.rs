use hue_colorize::{
    colorize,
    predictor::{predict_chrominance, U_SCALE, V_SCALE},
    ColorizeConfig, ColorizeError, Device, PredictorSession, Tensor4,
};
use hue_image::{ImageSize, PixelBuffer};
use hue_imgproc::interpolation::InterpolationMode;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Returns a constant chrominance at a fixed native resolution.
fn constant_predictor(
    u: f32,
    v: f32,
    size: ImageSize,
) -> impl Fn(&Tensor4, Device) -> Result<Tensor4, ColorizeError> + Send + Sync {
    move |_: &Tensor4, _: Device| {
        let plane = size.area();
        let mut data = vec![u; plane];
        data.extend(std::iter::repeat(v).take(plane));
        Tensor4::from_shape_vec([1, 2, size.height, size.width], data)
    }
}

#[test]
fn mid_gray_stays_gray() -> Result<(), ColorizeError> {
    init_logger();

    let image = PixelBuffer::new([4, 4].into(), 1, vec![128; 16])?;
    let predictor = constant_predictor(0.0, 0.0, [4, 4].into());

    let rgb = colorize(&image, &predictor, Device::Cpu, InterpolationMode::Bilinear)?;

    assert_eq!(rgb.size(), image.size());
    assert_eq!(rgb.num_channels(), 3);
    for pixel in rgb.as_slice().chunks_exact(3) {
        for &c in pixel {
            assert!((126..=130).contains(&c), "pixel {pixel:?} is not gray");
        }
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }
    Ok(())
}

#[test]
fn constant_chroma_scaling() -> Result<(), ColorizeError> {
    let image = PixelBuffer::new([6, 4].into(), 3, vec![50; 6 * 4 * 3])?;
    let luma = image.channel(0)?;

    let predictor = constant_predictor(1.0, 1.0, [3, 2].into());
    let chroma = predict_chrominance(&luma, &predictor, Device::Cpu)?;

    assert_eq!(chroma.size(), ImageSize::from([3, 2]));
    assert!(chroma.u.as_slice().iter().all(|&x| x == U_SCALE));
    assert!(chroma.v.as_slice().iter().all(|&x| x == V_SCALE));
    Ok(())
}

#[test]
fn output_size_independent_of_predictor_resolution() -> Result<(), ColorizeError> {
    init_logger();

    let image = PixelBuffer::new([37, 23].into(), 2, vec![180; 37 * 23 * 2])?;

    for native in [[1, 1], [8, 8], [37, 23], [64, 48]] {
        let predictor = constant_predictor(0.1, -0.1, native.into());
        let rgb = colorize(&image, &predictor, Device::Cpu, InterpolationMode::Bilinear)?;

        assert_eq!(rgb.size(), image.size());
        assert_eq!(rgb.as_slice().len(), 37 * 23 * 3);
    }
    Ok(())
}

#[test]
fn chroma_tints_output() -> Result<(), ColorizeError> {
    // a positive V pushes red up and green down
    let image = PixelBuffer::new([2, 2].into(), 1, vec![100; 4])?;
    let predictor = constant_predictor(0.0, 0.2, [1, 1].into());

    let rgb = colorize(&image, &predictor, Device::Cpu, InterpolationMode::Bilinear)?;

    for pixel in rgb.as_slice().chunks_exact(3) {
        assert!(pixel[0] > 100, "red not increased: {pixel:?}");
        assert!(pixel[1] < 100, "green not decreased: {pixel:?}");
    }
    Ok(())
}

#[test]
fn session_reuses_predictor() -> Result<(), ColorizeError> {
    init_logger();

    let session = PredictorSession::new(
        |_: Device| -> Result<_, ColorizeError> { Ok(constant_predictor(0.0, 0.0, [2, 2].into())) },
        ColorizeConfig::default().with_device(Device::Cuda(0)),
    );

    let image = PixelBuffer::new([4, 2].into(), 4, vec![200; 4 * 2 * 4])?;
    let first = session.colorize(&image)?;
    let second = session.colorize(&image)?;

    assert_eq!(first, second);
    assert!(session.is_loaded());
    Ok(())
}

#[test]
fn empty_image_is_rejected() -> Result<(), ColorizeError> {
    let image = PixelBuffer::new([0, 0].into(), 1, vec![])?;
    let predictor = constant_predictor(0.0, 0.0, [1, 1].into());

    assert!(matches!(
        colorize(&image, &predictor, Device::Cpu, InterpolationMode::Bilinear),
        Err(ColorizeError::ShapePrecondition(_))
    ));
    Ok(())
}
