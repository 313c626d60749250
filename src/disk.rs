use crate::image_utils::{in_bounds, BinaryMask};
use crate::shape_analysis::ShapeSummary;

/// Integer disk parameters derived from a shape summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskGeometry {
    /// (row, col)
    pub center: (i64, i64),
    pub radius: u32,
}

/// Round the centroid and half the equivalent diameter, half away from zero
pub fn disk_geometry(summary: &ShapeSummary) -> DiskGeometry {
    DiskGeometry {
        center: (summary.centroid.0.round() as i64, summary.centroid.1.round() as i64),
        radius: (summary.equivalent_diameter / 2.0).round().max(0.0) as u32,
    }
}

/// Filled disk of all pixels within `radius` of `center`, clipped to `bounds`.
///
/// `bounds` is (height, width). A pixel is set when
/// `(r - cr)^2 + (c - cc)^2 <= radius^2`.
pub fn rasterize(center: (i64, i64), radius: u32, bounds: (u32, u32)) -> BinaryMask {
    let (height, width) = bounds;
    let mut mask = BinaryMask::new(height, width);

    let (cr, cc) = center;
    let r = radius as i64;
    let r_sq = r * r;

    for row in (cr - r)..=(cr + r) {
        for col in (cc - r)..=(cc + r) {
            let dr = row - cr;
            let dc = col - cc;
            if dr * dr + dc * dc <= r_sq && in_bounds(row, col, height, width) {
                mask.set(row as u32, col as u32);
            }
        }
    }

    mask
}
