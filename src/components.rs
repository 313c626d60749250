use image::Luma;
use imageproc::region_labelling::connected_components;

use crate::config::Connectivity;
use crate::errors::SegmentFailure;
use crate::image_utils::{BinaryMask, PixelCoord, MASK_OFF};

/// Half-open pixel bounding box: rows `min_row..max_row`, cols `min_col..max_col`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
}

impl BoundingBox {
    fn from_pixel(p: PixelCoord) -> Self {
        Self {
            min_row: p.row,
            min_col: p.col,
            max_row: p.row + 1,
            max_col: p.col + 1,
        }
    }

    fn include(&mut self, p: PixelCoord) {
        self.min_row = self.min_row.min(p.row);
        self.min_col = self.min_col.min(p.col);
        self.max_row = self.max_row.max(p.row + 1);
        self.max_col = self.max_col.max(p.col + 1);
    }

    pub fn contains(&self, p: PixelCoord) -> bool {
        self.min_row <= p.row && p.row < self.max_row && self.min_col <= p.col && p.col < self.max_col
    }
}

/// One connected component of a region
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Label assigned by the labeling pass, starting at 1
    pub label: u32,
    pub bbox: BoundingBox,
    /// Mean (row, col) of member pixels
    pub centroid: (f64, f64),
    /// Pixel count
    pub area: u32,
}

/// Running sums for one label
struct Accumulator {
    bbox: BoundingBox,
    row_sum: f64,
    col_sum: f64,
    area: u32,
}

/// Label the connected components of `region` and measure each of them.
///
/// Components are returned in ascending label order.
pub fn find_components(region: &BinaryMask, connectivity: Connectivity) -> Vec<Component> {
    let labeled = connected_components(region.as_gray_image(), connectivity.into(), Luma([MASK_OFF]));

    let mut accumulators: Vec<Option<Accumulator>> = Vec::new();
    for (x, y, pixel) in labeled.enumerate_pixels() {
        let label = pixel[0] as usize;
        if label == 0 {
            continue;
        }
        if accumulators.len() <= label {
            accumulators.resize_with(label + 1, || None);
        }

        let p = PixelCoord::new(y, x);
        let acc = accumulators[label].get_or_insert_with(|| Accumulator {
            bbox: BoundingBox::from_pixel(p),
            row_sum: 0.0,
            col_sum: 0.0,
            area: 0,
        });
        acc.bbox.include(p);
        acc.row_sum += y as f64;
        acc.col_sum += x as f64;
        acc.area += 1;
    }

    accumulators
        .into_iter()
        .enumerate()
        .filter_map(|(label, acc)| {
            acc.map(|acc| Component {
                label: label as u32,
                bbox: acc.bbox,
                centroid: (acc.row_sum / acc.area as f64, acc.col_sum / acc.area as f64),
                area: acc.area,
            })
        })
        .collect()
}

/// Pick the component whose bounding box contains `seed`.
///
/// Components are disjoint, but bounding boxes may still overlap (a ring
/// around a blob); the first match in label order wins.
pub fn select(
    region: &BinaryMask,
    seed: PixelCoord,
    connectivity: Connectivity,
) -> Result<Component, SegmentFailure> {
    find_components(region, connectivity)
        .into_iter()
        .find(|component| component.bbox.contains(seed))
        .ok_or(SegmentFailure::NoComponent { row: seed.row, col: seed.col })
}
