use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use hue_image::Image;
use hue_imgproc::color::{rgb_from_yuv, yuv_from_rgb};

fn bench_yuv(c: &mut Criterion) {
    let mut group = c.benchmark_group("Yuv");

    for (width, height) in [(256usize, 224usize), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let image = Image::<f32, 3>::from_size_val(image_size, 128.0).unwrap();
        let out = Image::<f32, 3>::from_size_val(image_size, 0.0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("yuv_from_rgb", &parameter_string),
            &(&image, &out),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(yuv_from_rgb(src, &mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("rgb_from_yuv", &parameter_string),
            &(&image, &out),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(rgb_from_yuv(src, &mut dst)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_yuv);
criterion_main!(benches);
