//! Rectangle overlays for visual inspection of candidates and detections.

use crate::image::{BinaryMask, PixelFormat, PixelGrid};
use crate::region::BoundingBox;
use crate::util::{HumatchError, HumatchResult};

/// BGR outline color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bgr(pub [u8; 3]);

impl Bgr {
    /// Color used for unconfirmed candidates.
    pub const RED: Bgr = Bgr([0, 0, 255]);
    /// Color used for confirmed detections.
    pub const GREEN: Bgr = Bgr([0, 255, 0]);
}

/// Draws the one-pixel outline of `bbox` (corners inclusive) in place.
pub fn draw_rectangle(grid: &mut PixelGrid, bbox: &BoundingBox, color: Bgr) -> HumatchResult<()> {
    grid.require_format(PixelFormat::Tricolor)?;
    if !bbox.fits(grid.width(), grid.height()) {
        return Err(HumatchError::RoiOutOfBounds {
            x: bbox.x1,
            y: bbox.y1,
            width: bbox.span_x() + 1,
            height: bbox.span_y() + 1,
            img_width: grid.width(),
            img_height: grid.height(),
        });
    }

    for x in bbox.x1..=bbox.x2 {
        grid.set_pixel(bbox.y1, x, &color.0);
        grid.set_pixel(bbox.y2, x, &color.0);
    }
    for y in bbox.y1..=bbox.y2 {
        grid.set_pixel(y, bbox.x1, &color.0);
        grid.set_pixel(y, bbox.x2, &color.0);
    }
    Ok(())
}

/// Expands a mask to gray BGR and outlines every candidate in red.
pub fn show_rois(mask: &BinaryMask, boxes: &[BoundingBox]) -> HumatchResult<PixelGrid> {
    let mut out = PixelGrid::tricolor_from_fn(mask.width(), mask.height(), |row, col| {
        let v = mask.get(row, col);
        [v, v, v]
    })?;
    for bbox in boxes {
        draw_rectangle(&mut out, bbox, Bgr::RED)?;
    }
    Ok(out)
}

/// Copies a BGR image and outlines every detection in green.
pub fn overlay_detections(image: &PixelGrid, boxes: &[BoundingBox]) -> HumatchResult<PixelGrid> {
    let mut out = image.clone();
    for bbox in boxes {
        draw_rectangle(&mut out, bbox, Bgr::GREEN)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{draw_rectangle, show_rois, Bgr};
    use crate::image::{BinaryMask, PixelFormat, PixelGrid};
    use crate::region::BoundingBox;

    #[test]
    fn outline_touches_only_the_box_edges() {
        let mut grid = PixelGrid::filled(6, 6, PixelFormat::Tricolor, 0).unwrap();
        let bbox = BoundingBox::new(1, 1, 4, 3).unwrap();
        draw_rectangle(&mut grid, &bbox, Bgr::GREEN).unwrap();
        assert_eq!(grid.pixel(1, 1), &[0, 255, 0]);
        assert_eq!(grid.pixel(3, 4), &[0, 255, 0]);
        assert_eq!(grid.pixel(2, 2), &[0, 0, 0]);
        assert_eq!(grid.pixel(5, 5), &[0, 0, 0]);
        let painted = grid.data().chunks_exact(3).filter(|px| px[1] == 255).count();
        // Perimeter of a 4x3 box.
        assert_eq!(painted, 10);
    }

    #[test]
    fn mono_target_is_rejected() {
        let mut grid = PixelGrid::filled(4, 4, PixelFormat::Mono, 0).unwrap();
        let bbox = BoundingBox::new(0, 0, 1, 1).unwrap();
        assert!(draw_rectangle(&mut grid, &bbox, Bgr::RED).is_err());
    }

    #[test]
    fn show_rois_replicates_mask_into_gray() {
        let mask = BinaryMask::from_fn(5, 5, |row, _| row == 4).unwrap();
        let out = show_rois(&mask, &[BoundingBox::new(0, 0, 1, 1).unwrap()]).unwrap();
        assert_eq!(out.pixel(4, 3), &[255, 255, 255]);
        assert_eq!(out.pixel(2, 3), &[0, 0, 0]);
        assert_eq!(out.pixel(0, 0), &[0, 0, 255]);
    }
}
