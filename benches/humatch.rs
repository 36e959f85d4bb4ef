use humatch::{
    apply_dilation, apply_erosion, apply_hsv_thresholding, convert_to_hsv, find_rois,
    BinaryMask, Detector, DetectorConfig, HsvBounds, PixelGrid, RoiLimits, ShapeDescriptor,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> PixelGrid {
    PixelGrid::tricolor_from_fn(width, height, |y, x| {
        let frame = (x / 96 + y / 80) % 2 == 0;
        let ring = (x % 96 < 10 || x % 96 >= 86) || (y % 80 < 10 || y % 80 >= 70);
        if frame && ring {
            [0, 200, 0]
        } else {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0x3F;
            [value as u8, value as u8, value as u8]
        }
    })
    .unwrap()
}

fn make_mask(width: usize, height: usize) -> BinaryMask {
    BinaryMask::from_fn(width, height, |y, x| ((x * 31) ^ (y * 17)) % 7 < 3).unwrap()
}

fn bench_stages(c: &mut Criterion) {
    let image = make_image(640, 480);
    let bounds = HsvBounds::default();

    c.bench_function("convert_to_hsv_640x480", |b| {
        b.iter(|| black_box(convert_to_hsv(&image).unwrap()));
    });

    let hsv = convert_to_hsv(&image).unwrap();
    c.bench_function("hsv_threshold_640x480", |b| {
        b.iter(|| black_box(apply_hsv_thresholding(&hsv, &bounds).unwrap()));
    });

    let mask = make_mask(640, 480);
    c.bench_function("erosion_3x3", |b| {
        b.iter(|| black_box(apply_erosion(&mask, 3, 0).unwrap()));
    });
    c.bench_function("dilation_5x5", |b| {
        b.iter(|| black_box(apply_dilation(&mask, 5, 255).unwrap()));
    });

    let limits = RoiLimits::unbounded(640, 480);
    c.bench_function("find_rois_640x480", |b| {
        b.iter(|| black_box(find_rois(&mask, &limits)));
    });

    let region = mask.grid().crop(100, 100, 160, 120).unwrap();
    c.bench_function("shape_descriptor_160x120", |b| {
        b.iter(|| black_box(ShapeDescriptor::from_grid(&region)));
    });
}

fn bench_detector(c: &mut Criterion) {
    let image = make_image(1280, 960);
    let detector = Detector::new().with_config(DetectorConfig {
        scale_percent: 30.0,
        min_width: 20,
        min_height: 15,
        ..DetectorConfig::default()
    });
    c.bench_function("detect_1280x960_scale30", |b| {
        b.iter(|| black_box(detector.detect(&image).unwrap()));
    });

    if cfg!(feature = "rayon") {
        let parallel = Detector::new().with_config(DetectorConfig {
            parallel: true,
            ..detector.config().clone()
        });
        c.bench_function("detect_1280x960_scale30_par", |b| {
            b.iter(|| black_box(parallel.detect(&image).unwrap()));
        });
    }
}

criterion_group!(benches, bench_stages, bench_detector);
criterion_main!(benches);
