use humatch::lowlevel::FOREGROUND;
use humatch::{
    apply_hsv_thresholding, convert_to_hsv, overlay_detections, show_rois, AcceptanceRange,
    BoundingBox, Detector, DetectorConfig, HsvBounds, PixelGrid, ShapeTemplate,
};

const BACKDROP: [u8; 3] = [90, 90, 90];
const GREEN: [u8; 3] = [0, 200, 0];

fn frame_scene(width: usize, height: usize, frame: BoundingBox, thickness: usize) -> PixelGrid {
    PixelGrid::tricolor_from_fn(width, height, |row, col| {
        let inside = row >= frame.y1 && row <= frame.y2 && col >= frame.x1 && col <= frame.x2;
        let in_hole = row >= frame.y1 + thickness
            && row + thickness <= frame.y2
            && col >= frame.x1 + thickness
            && col + thickness <= frame.x2;
        if inside && !in_hole {
            GREEN
        } else {
            BACKDROP
        }
    })
    .unwrap()
}

fn wide_template() -> ShapeTemplate {
    ShapeTemplate {
        m6: AcceptanceRange::new(-1e3, 1e3).unwrap(),
        m7: AcceptanceRange::new(-1e3, 1e3).unwrap(),
        area_ratio: AcceptanceRange::new(0.1, 10.0).unwrap(),
    }
}

#[test]
fn frame_is_proposed_and_confirmed_at_full_resolution() {
    let frame = BoundingBox::new(50, 40, 149, 119).unwrap();
    let image = frame_scene(300, 240, frame, 10);

    let detector = Detector::new().with_config(DetectorConfig {
        template: wide_template(),
        ..DetectorConfig::default()
    });
    let detection = detector.detect(&image).unwrap();

    let raw_mask =
        apply_hsv_thresholding(&convert_to_hsv(&image).unwrap(), &HsvBounds::default()).unwrap();
    assert_eq!(detection.mask, raw_mask);
    assert_eq!(detection.candidates, vec![frame]);
    assert_eq!(detection.confirmed, vec![frame]);
    assert_eq!(detection.confirmed_original, vec![frame]);
}

#[test]
fn default_template_rejects_a_thin_frame() {
    let frame = BoundingBox::new(50, 40, 149, 119).unwrap();
    let image = frame_scene(300, 240, frame, 10);
    let detection = Detector::new().detect(&image).unwrap();
    assert_eq!(detection.candidates, vec![frame]);
    assert!(detection.confirmed.is_empty());
}

#[test]
fn downscaled_detection_maps_back_to_input_coordinates() {
    let frame = BoundingBox::new(50, 40, 149, 119).unwrap();
    let image = frame_scene(300, 240, frame, 10);
    let detector = Detector::new().with_config(DetectorConfig {
        scale_percent: 50.0,
        min_width: 20,
        min_height: 20,
        template: wide_template(),
        ..DetectorConfig::default()
    });
    let detection = detector.detect(&image).unwrap();

    assert_eq!(detection.mask.width(), 150);
    assert_eq!(detection.mask.height(), 120);
    let working = BoundingBox::new(25, 20, 74, 59).unwrap();
    assert_eq!(detection.confirmed, vec![working]);
    assert_eq!(
        detection.confirmed_original,
        vec![BoundingBox::new(50, 40, 148, 118).unwrap()]
    );
}

#[test]
fn oversized_components_are_not_proposed() {
    let frame = BoundingBox::new(10, 10, 189, 129).unwrap();
    let image = frame_scene(200, 140, frame, 10);
    let detection = Detector::new().detect(&image).unwrap();
    assert!(detection.mask.count(FOREGROUND) > 0);
    assert!(detection.candidates.is_empty());
}

#[test]
fn overlays_outline_candidates_and_detections() {
    let frame = BoundingBox::new(50, 40, 149, 119).unwrap();
    let image = frame_scene(300, 240, frame, 10);
    let detection = Detector::new()
        .with_config(DetectorConfig {
            template: wide_template(),
            ..DetectorConfig::default()
        })
        .detect(&image)
        .unwrap();

    let rois = show_rois(&detection.mask, &detection.candidates).unwrap();
    assert_eq!(rois.pixel(40, 100), &[0, 0, 255]);
    assert_eq!(rois.pixel(80, 100), &[0, 0, 0]);

    let annotated = overlay_detections(&image, &detection.confirmed_original).unwrap();
    assert_eq!(annotated.pixel(119, 50), &[0, 255, 0]);
    assert_eq!(annotated.pixel(0, 0), &BACKDROP);
}
