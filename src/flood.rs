// src/flood.rs - Region growing from a seed pixel
//
// A pixel joins the region when it is reachable from the seed through
// admitted pixels and its intensity lies within `tolerance` of the seed
// intensity: |value - seed_value| <= tolerance. The comparison is always
// against the seed, never against the running region mean.

use std::collections::VecDeque;
use image::{ImageBuffer, Luma, Primitive};

use crate::config::Connectivity;
use crate::errors::SegmentFailure;
use crate::image_utils::{in_bounds, intensity, BinaryMask, PixelCoord};
use crate::seeds::Seed;

/// Round a seed to its pixel, half away from zero.
///
/// Fails with `OutOfBounds` when the rounded position (or a non-finite
/// coordinate) falls outside a `height` x `width` grid.
pub fn seed_pixel(seed: Seed, height: u32, width: u32) -> Result<PixelCoord, SegmentFailure> {
    let out_of_bounds = SegmentFailure::OutOfBounds { row: seed.row, col: seed.col };
    if !seed.row.is_finite() || !seed.col.is_finite() {
        return Err(out_of_bounds);
    }

    let row = seed.row.round();
    let col = seed.col.round();
    if row < 0.0 || col < 0.0 || row >= height as f64 || col >= width as f64 {
        return Err(out_of_bounds);
    }

    Ok(PixelCoord::new(row as u32, col as u32))
}

/// Grow a region from `seed` over pixels similar to the seed intensity.
///
/// The returned mask may be empty (negative or NaN tolerance); callers treat
/// that as `SegmentFailure::EmptyRegion`.
pub fn grow<T: Primitive>(
    image: &ImageBuffer<Luma<T>, Vec<T>>,
    seed: Seed,
    tolerance: f64,
    connectivity: Connectivity,
) -> Result<BinaryMask, SegmentFailure> {
    let (width, height) = image.dimensions();
    let start = seed_pixel(seed, height, width)?;

    let seed_value = intensity(image.get_pixel(start.col, start.row));
    let admits = |value: f64| (value - seed_value).abs() <= tolerance;

    let mut region = BinaryMask::new(height, width);
    if !admits(seed_value) {
        return Ok(region);
    }

    let mut visited = vec![false; (width as usize) * (height as usize)];
    let index = |p: PixelCoord| p.row as usize * width as usize + p.col as usize;

    let mut queue = VecDeque::new();
    visited[index(start)] = true;
    region.set(start.row, start.col);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &(dr, dc) in connectivity.offsets() {
            let nr = current.row as i64 + dr;
            let nc = current.col as i64 + dc;
            if !in_bounds(nr, nc, height, width) {
                continue;
            }

            let next = PixelCoord::new(nr as u32, nc as u32);
            let idx = index(next);
            if visited[idx] {
                continue;
            }
            visited[idx] = true;

            if admits(intensity(image.get_pixel(next.col, next.row))) {
                region.set(next.row, next.col);
                queue.push_back(next);
            }
        }
    }

    Ok(region)
}
