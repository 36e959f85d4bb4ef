use humatch::{BinaryMask, BoundingBox, HumatchError, PixelFormat, PixelGrid, RoiLimits};

#[test]
fn pixel_grid_rejects_invalid_dimensions() {
    let err = PixelGrid::new(Vec::new(), 0, 1, PixelFormat::Mono)
        .err()
        .unwrap();
    assert_eq!(
        err,
        HumatchError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = PixelGrid::filled(3, 0, PixelFormat::Tricolor, 0)
        .err()
        .unwrap();
    assert_eq!(
        err,
        HumatchError::InvalidDimensions {
            width: 3,
            height: 0,
        }
    );
}

#[test]
fn pixel_grid_rejects_mismatched_buffer() {
    let err = PixelGrid::new(vec![0u8; 11], 2, 2, PixelFormat::Tricolor)
        .err()
        .unwrap();
    assert_eq!(
        err,
        HumatchError::BufferSizeMismatch {
            expected: 12,
            got: 11
        }
    );
}

#[test]
fn pixel_grid_addresses_rows_and_channels() {
    let data: Vec<u8> = (0u8..24).collect();
    let grid = PixelGrid::new(data, 4, 2, PixelFormat::Tricolor).unwrap();
    assert_eq!(grid.channels(), 3);
    assert_eq!(grid.pixel(1, 2), &[18, 19, 20]);
    assert_eq!(grid.get(0, 3, 2), 11);
    assert_eq!(grid.primary(1, 0), 12);
}

#[test]
fn crop_copies_the_requested_rectangle() {
    let grid = PixelGrid::mono_from_fn(5, 4, |row, col| (row * 10 + col) as u8).unwrap();
    let crop = grid.crop(1, 2, 3, 2).unwrap();
    assert_eq!(crop.width(), 3);
    assert_eq!(crop.height(), 2);
    assert_eq!(crop.data(), &[21, 22, 23, 31, 32, 33]);
}

#[test]
fn crop_rejects_out_of_bounds_rectangles() {
    let grid = PixelGrid::filled(5, 4, PixelFormat::Mono, 0).unwrap();
    let err = grid.crop(3, 1, 3, 2).err().unwrap();
    assert_eq!(
        err,
        HumatchError::RoiOutOfBounds {
            x: 3,
            y: 1,
            width: 3,
            height: 2,
            img_width: 5,
            img_height: 4,
        }
    );
}

#[test]
fn binary_mask_rejects_gray_values() {
    let grid = PixelGrid::mono_from_fn(3, 2, |row, col| if row == 1 && col == 2 { 7 } else { 0 })
        .unwrap();
    let err = BinaryMask::from_grid(grid).err().unwrap();
    assert_eq!(
        err,
        HumatchError::NonBinaryMask {
            value: 7,
            row: 1,
            col: 2
        }
    );
}

#[test]
fn binary_mask_rejects_tricolor_grids() {
    let grid = PixelGrid::filled(2, 2, PixelFormat::Tricolor, 0).unwrap();
    let err = BinaryMask::from_grid(grid).err().unwrap();
    assert_eq!(
        err,
        HumatchError::FormatMismatch {
            expected: PixelFormat::Mono,
            got: PixelFormat::Tricolor,
        }
    );
}

#[test]
fn bounding_box_rejects_inverted_corners() {
    assert!(BoundingBox::new(4, 0, 3, 2).is_err());
    assert!(BoundingBox::new(0, 3, 1, 2).is_err());
    let bbox = BoundingBox::new(2, 1, 6, 1).unwrap();
    assert_eq!(bbox.span_x(), 4);
    assert_eq!(bbox.span_y(), 0);
}

#[test]
fn roi_limits_validate_min_against_max() {
    assert!(RoiLimits::new(10, 10, 5, 20).validate().is_err());
    assert!(RoiLimits::new(10, 10, 10, 10).validate().is_ok());
}
