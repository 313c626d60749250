// src/labeling.rs - Seed orchestration: turn each new seed into a labeled disk
//
// The label canvas and the processed-seed set are the only state that
// survives between calls. Both are written exclusively by process_new_seeds;
// seeds are handled in ascending index order, so on overlap the higher index
// always owns the pixel.

use std::collections::BTreeSet;
use image::{ImageBuffer, Luma, Primitive};

use crate::components::{select, Component};
use crate::config::SegmentationParams;
use crate::disk::{disk_geometry, rasterize, DiskGeometry};
use crate::errors::{CoinLabelError, Result, SegmentFailure};
use crate::flood::{grow, seed_pixel};
use crate::image_utils::{BinaryMask, PixelCoord};
use crate::seeds::{Seed, SeedList};
use crate::shape_analysis::{summarize, ShapeSummary};

/// Per-pixel seed ownership: 0 is unlabeled, `i + 1` belongs to seed `i`
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCanvas {
    labels: ImageBuffer<Luma<u32>, Vec<u32>>,
}

impl LabelCanvas {
    /// All-zero canvas of `height` rows and `width` columns
    pub fn new(height: u32, width: u32) -> Self {
        Self {
            labels: ImageBuffer::new(width, height),
        }
    }

    /// Canvas matching the dimensions of `image`
    pub fn for_image<T: Primitive>(image: &ImageBuffer<Luma<T>, Vec<T>>) -> Self {
        let (width, height) = image.dimensions();
        Self::new(height, width)
    }

    pub fn height(&self) -> u32 {
        self.labels.height()
    }

    pub fn width(&self) -> u32 {
        self.labels.width()
    }

    /// (height, width)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.height(), self.width())
    }

    pub fn get(&self, row: u32, col: u32) -> u32 {
        self.labels.get_pixel(col, row)[0]
    }

    /// (row, col, label) for every pixel, row-major
    pub fn iter_labels(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        self.labels.enumerate_pixels().map(|(x, y, p)| (y, x, p[0]))
    }

    pub fn max_label(&self) -> u32 {
        self.labels.pixels().map(|p| p[0]).max().unwrap_or(0)
    }

    pub fn labeled_count(&self) -> usize {
        self.labels.pixels().filter(|p| p[0] != 0).count()
    }

    pub fn as_image(&self) -> &ImageBuffer<Luma<u32>, Vec<u32>> {
        &self.labels
    }

    /// Write `label` under every set pixel of `mask`
    pub(crate) fn paint(&mut self, mask: &BinaryMask, label: u32) {
        for p in mask.iter_set() {
            self.labels.put_pixel(p.col, p.row, Luma([label]));
        }
    }
}

/// Seed indices that have already been turned into disks (or given up on)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedSeeds {
    indices: BTreeSet<usize>,
}

impl ProcessedSeeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }
}

/// Everything the pipeline learned about one seed
#[derive(Debug, Clone, PartialEq)]
pub struct DiskFit {
    pub seed_pixel: PixelCoord,
    pub component: Component,
    pub summary: ShapeSummary,
    pub geometry: DiskGeometry,
    pub mask: BinaryMask,
}

/// Run flood fill, component selection, summary and rasterization for one seed
pub fn detect_coin_disk<T: Primitive>(
    image: &ImageBuffer<Luma<T>, Vec<T>>,
    seed: Seed,
    params: &SegmentationParams,
) -> std::result::Result<DiskFit, SegmentFailure> {
    let (width, height) = image.dimensions();
    let pixel = seed_pixel(seed, height, width)?;

    let region = grow(image, seed, params.tolerance, params.connectivity)?;
    if region.is_empty() {
        return Err(SegmentFailure::EmptyRegion);
    }

    let component = select(&region, pixel, params.connectivity)?;
    let summary = summarize(&component);
    let geometry = disk_geometry(&summary);
    let mask = rasterize(geometry.center, geometry.radius, (height, width));

    Ok(DiskFit {
        seed_pixel: pixel,
        component,
        summary,
        geometry,
        mask,
    })
}

/// Label every seed in `seeds` that is not yet in `processed`.
///
/// Failed seeds leave the canvas untouched but are still marked processed and
/// never retried. Calling again with the same seeds is a no-op. A canvas whose
/// dimensions differ from the image is rejected before any seed is touched.
pub fn process_new_seeds<'a, T: Primitive>(
    image: &ImageBuffer<Luma<T>, Vec<T>>,
    canvas: &'a mut LabelCanvas,
    seeds: &SeedList,
    processed: &mut ProcessedSeeds,
    params: &SegmentationParams,
) -> Result<&'a LabelCanvas> {
    let (width, height) = image.dimensions();
    if canvas.dimensions() != (height, width) {
        return Err(CoinLabelError::DimensionMismatch {
            expected: (height, width),
            actual: canvas.dimensions(),
        });
    }

    label_new_seeds(image, canvas, seeds, processed, params);
    Ok(canvas)
}

/// Orchestration loop; the caller guarantees matching canvas dimensions
fn label_new_seeds<T: Primitive>(
    image: &ImageBuffer<Luma<T>, Vec<T>>,
    canvas: &mut LabelCanvas,
    seeds: &SeedList,
    processed: &mut ProcessedSeeds,
    params: &SegmentationParams,
) {
    for (index, seed) in seeds.iter() {
        if processed.contains(index) {
            continue;
        }

        match seed_label(index) {
            Some(label) => match detect_coin_disk(image, seed, params) {
                Ok(fit) => {
                    log::debug!(
                        "Seed {} at ({:.1}, {:.1}): area {} -> disk r={} at {:?}, label {}",
                        index, seed.row, seed.col, fit.component.area,
                        fit.geometry.radius, fit.geometry.center, label
                    );
                    canvas.paint(&fit.mask, label);
                }
                Err(failure @ SegmentFailure::NoComponent { .. }) => {
                    // Flood fill and labeling disagree on connectivity
                    log::warn!("Seed {} skipped: {}", index, failure);
                }
                Err(failure) => {
                    log::debug!("Seed {} skipped: {}", index, failure);
                }
            },
            None => log::warn!("Seed {} skipped: index does not fit a 32-bit label", index),
        }

        processed.insert(index);
    }
}

/// Label for seed `index`, or `None` when it does not fit in 32 bits
pub fn seed_label(index: usize) -> Option<u32> {
    index.checked_add(1).and_then(|label| u32::try_from(label).ok())
}

/// One labeling session over a single image.
///
/// Owns the canvas and the processed set; `&mut self` on
/// [`LabelSession::process_new_seeds`] keeps a single writer.
pub struct LabelSession<'img, T: Primitive> {
    image: &'img ImageBuffer<Luma<T>, Vec<T>>,
    canvas: LabelCanvas,
    processed: ProcessedSeeds,
    params: SegmentationParams,
}

impl<'img, T: Primitive> LabelSession<'img, T> {
    pub fn new(image: &'img ImageBuffer<Luma<T>, Vec<T>>, params: SegmentationParams) -> Self {
        Self {
            image,
            canvas: LabelCanvas::for_image(image),
            processed: ProcessedSeeds::new(),
            params,
        }
    }

    /// Process whatever was appended to `seeds` since the last call
    pub fn process_new_seeds(&mut self, seeds: &SeedList) -> &LabelCanvas {
        // The canvas was sized from the image in `new`
        label_new_seeds(self.image, &mut self.canvas, seeds, &mut self.processed, &self.params);
        &self.canvas
    }

    pub fn canvas(&self) -> &LabelCanvas {
        &self.canvas
    }

    pub fn processed(&self) -> &ProcessedSeeds {
        &self.processed
    }

    pub fn params(&self) -> &SegmentationParams {
        &self.params
    }

    pub fn into_canvas(self) -> LabelCanvas {
        self.canvas
    }
}
