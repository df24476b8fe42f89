use circledet::{Detector, DetectorConfig, EdgeMap, ImageView, Strategy};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn disk_image(width: usize, height: usize, cx: usize, cy: usize, radius: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * height];
    let r2 = (radius * radius) as i64;
    for y in 0..height {
        for x in 0..width {
            let dx = x as i64 - cx as i64;
            let dy = y as i64 - cy as i64;
            if dx * dx + dy * dy <= r2 {
                data[y * width + x] = 255;
            }
        }
    }
    data
}

fn bench_detector(c: &mut Criterion) {
    let width = 128;
    let height = 128;
    let data = disk_image(width, height, 64, 64, 30);
    let view = ImageView::from_slice(&data, width, height).unwrap();

    c.bench_function("edge_map", |b| {
        b.iter(|| black_box(EdgeMap::compute(view).max()));
    });

    let single = Detector::new().with_config(DetectorConfig {
        strategy: Strategy::SingleScale,
        radius_min: Some(20),
        radius_max: Some(40),
        ..DetectorConfig::default()
    });
    c.bench_function("detect_single_scale", |b| {
        b.iter(|| black_box(single.detect(view).unwrap()));
    });

    let multi = Detector::new();
    c.bench_function("detect_multi_scale", |b| {
        b.iter(|| black_box(multi.detect(view).unwrap()));
    });

    if cfg!(feature = "rayon") {
        let parallel = Detector::new().with_config(DetectorConfig {
            parallel: true,
            ..DetectorConfig::default()
        });
        c.bench_function("detect_multi_scale_parallel", |b| {
            b.iter(|| black_box(parallel.detect(view).unwrap()));
        });
    }
}

criterion_group!(benches, bench_detector);
criterion_main!(benches);
