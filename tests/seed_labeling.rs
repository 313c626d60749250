// tests/seed_labeling.rs - End-to-end behaviour of the seed orchestrator on small synthetic images

use assert_approx_eq::assert_approx_eq;
use image::{GrayImage, Luma};

use coin_label_rust_lib::{
    detect_coin_disk, grow, process_new_seeds, rasterize, select, summarize, Connectivity,
    LabelCanvas, LabelSession, EXPLORATORY_TOLERANCE, PixelCoord, ProcessedSeeds, SegmentFailure, SegmentationParams,
    Seed, SeedList,
};

fn params(tolerance: f64, connectivity: Connectivity) -> SegmentationParams {
    SegmentationParams { tolerance, connectivity }
}

fn seed_list(points: &[(f64, f64)]) -> SeedList {
    points.iter().map(|&(row, col)| Seed::new(row, col)).collect()
}

/// Checkerboard-ish image where every pixel differs from all its neighbors
fn speckled(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x * 7 + y * 13) % 17 * 15) as u8]))
}

/// Two coins of radius 6 on a dark background
fn two_coins() -> GrayImage {
    GrayImage::from_fn(40, 20, |x, y| {
        let inside = |cx: f64, cy: f64| {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            dx * dx + dy * dy <= 36.0
        };
        Luma([if inside(10.0, 10.0) { 200 } else if inside(28.0, 9.0) { 150 } else { 25 }])
    })
}

#[test]
fn uniform_image_is_fully_labeled() {
    let image = GrayImage::from_pixel(3, 3, Luma([100]));
    let p = params(255.0, Connectivity::Four);

    let region = grow(&image, Seed::new(1.0, 1.0), p.tolerance, p.connectivity).unwrap();
    assert_eq!(region.count(), 9);

    let component = select(&region, PixelCoord::new(1, 1), p.connectivity).unwrap();
    assert_eq!(component.area, 9);
    assert_eq!(component.centroid, (1.0, 1.0));

    let summary = summarize(&component);
    assert_approx_eq!(summary.equivalent_diameter, 3.385, 1e-3);

    let fit = detect_coin_disk(&image, Seed::new(1.0, 1.0), &p).unwrap();
    assert_eq!(fit.geometry.radius, 2);
    assert_eq!(fit.mask.count(), 9);

    let mut session = LabelSession::new(&image, p);
    session.process_new_seeds(&seed_list(&[(1.0, 1.0)]));
    assert!(session.canvas().iter_labels().all(|(_, _, label)| label == 1));
}

#[test]
fn out_of_bounds_seed_is_consumed() {
    let image = GrayImage::from_pixel(3, 3, Luma([100]));
    let mut canvas = LabelCanvas::for_image(&image);
    let mut processed = ProcessedSeeds::new();
    let seeds = seed_list(&[(-1.0, -1.0)]);

    assert!(matches!(
        detect_coin_disk(&image, Seed::new(-1.0, -1.0), &SegmentationParams::default()),
        Err(SegmentFailure::OutOfBounds { .. })
    ));

    let canvas = process_new_seeds(&image, &mut canvas, &seeds, &mut processed, &SegmentationParams::default())
        .unwrap();
    assert_eq!(canvas.labeled_count(), 0);
    assert!(processed.contains(0));
}

#[test]
fn duplicate_seed_takes_higher_label() {
    let image = GrayImage::from_pixel(3, 3, Luma([100]));
    let mut session = LabelSession::new(&image, params(255.0, Connectivity::Eight));

    let canvas = session.process_new_seeds(&seed_list(&[(1.0, 1.0), (1.0, 1.0)]));
    assert!(canvas.iter_labels().all(|(_, _, label)| label == 2));
}

#[test]
fn isolated_seed_pixel_gives_small_disk() {
    for connectivity in [Connectivity::Four, Connectivity::Eight] {
        let image = speckled(6, 5);
        let p = params(0.0, connectivity);

        let fit = detect_coin_disk(&image, Seed::new(2.0, 3.0), &p).unwrap();
        assert_eq!(fit.component.area, 1);
        assert_approx_eq!(fit.summary.equivalent_diameter, 1.128, 1e-3);
        assert_eq!(fit.geometry.radius, 1);
        assert_eq!(fit.mask.count(), 5);

        // Seed in the corner: the plus shape is clipped to three pixels
        let corner = detect_coin_disk(&image, Seed::new(0.0, 0.0), &p).unwrap();
        assert_eq!(corner.mask.count(), 3);
    }
}

#[test]
fn reprocessing_the_same_seeds_changes_nothing() {
    let image = two_coins();
    let mut session = LabelSession::new(&image, SegmentationParams::default());
    let seeds = seed_list(&[(10.0, 10.0), (9.0, 28.0), (100.0, 3.0)]);

    let first = session.process_new_seeds(&seeds).clone();
    let processed_before = session.processed().clone();

    let second = session.process_new_seeds(&seeds).clone();
    assert_eq!(first, second);
    assert_eq!(session.processed(), &processed_before);
}

#[test]
fn processed_set_only_grows() {
    let image = two_coins();
    let mut session = LabelSession::new(&image, SegmentationParams::default());
    let mut seeds = SeedList::new();
    let mut previous: Vec<usize> = Vec::new();

    for &(row, col) in &[(10.0, 10.0), (-5.0, 2.0), (9.0, 28.0), (0.0, 0.0)] {
        seeds.push(Seed::new(row, col));
        session.process_new_seeds(&seeds);

        let current: Vec<usize> = session.processed().iter().collect();
        assert!(previous.iter().all(|i| current.contains(i)));
        assert_eq!(current.len(), seeds.len());
        previous = current;
    }
}

#[test]
fn seed_lies_in_component_and_disk_is_centered_on_centroid() {
    let image = two_coins();
    let p = SegmentationParams::default();

    for seed in [Seed::new(10.0, 10.0), Seed::new(12.4, 7.6), Seed::new(9.0, 28.0)] {
        let fit = detect_coin_disk(&image, seed, &p).unwrap();
        assert!(fit.component.bbox.contains(fit.seed_pixel));
        assert_eq!(
            fit.geometry.center,
            (fit.component.centroid.0.round() as i64, fit.component.centroid.1.round() as i64)
        );
        assert!(fit.mask.get(fit.geometry.center.0 as u32, fit.geometry.center.1 as u32));
    }
}

#[test]
fn coins_are_fitted_with_matching_disks() {
    let image = two_coins();
    let mut session = LabelSession::new(&image, SegmentationParams::default());
    let canvas = session.process_new_seeds(&seed_list(&[(10.0, 10.0), (9.0, 28.0)]));

    assert_eq!(canvas.get(10, 10), 1);
    assert_eq!(canvas.get(9, 28), 2);
    assert_eq!(canvas.get(0, 0), 0);
    assert_eq!(canvas.get(10, 19), 0);
}

#[test]
fn masks_stay_inside_the_image() {
    let image = speckled(7, 4);
    let (height, width) = (4, 7);

    for &(row, col) in &[(0.0, 0.0), (3.4, 6.4), (-0.4, 6.49), (3.0, 0.0)] {
        let region = grow(&image, Seed::new(row, col), 255.0, Connectivity::Eight).unwrap();
        assert_eq!(region.dimensions(), (height, width));
        assert!(region.iter_set().all(|p| p.row < height && p.col < width));
    }

    for &(row, col) in &[(-3, -3), (0, 0), (3, 6), (10, 20)] {
        let disk = rasterize((row, col), 4, (height, width));
        assert_eq!(disk.dimensions(), (height, width));
        assert!(disk.iter_set().all(|p| p.row < height && p.col < width));
    }

    for &(row, col) in &[(4.5, 0.0), (0.0, 7.0), (-1.0, 3.0)] {
        assert!(grow(&image, Seed::new(row, col), 255.0, Connectivity::Eight).is_err());
    }
}

#[test]
fn overlap_goes_to_higher_index_regardless_of_batching() {
    // Two flat strips that differ by one gray level; with zero tolerance each
    // seed grows exactly its own strip, and the fitted disks overlap.
    let image = GrayImage::from_fn(12, 5, |x, _| Luma([if x < 6 { 90 } else { 91 }]));
    let strips = params(0.0, Connectivity::Four);
    let seeds = seed_list(&[(2.0, 2.0), (2.0, 8.0)]);

    let mut all_at_once = LabelSession::new(&image, strips);
    all_at_once.process_new_seeds(&seeds);

    let mut one_by_one = LabelSession::new(&image, strips);
    let mut growing = SeedList::new();
    for (_, seed) in seeds.iter() {
        growing.push(seed);
        one_by_one.process_new_seeds(&growing);
    }

    assert_eq!(all_at_once.canvas(), one_by_one.canvas());

    // Each strip is 6x5 (area 30): radius round(3.09) = 3 around (2, 2.5 -> 3)
    // and (2, 8.5 -> 9); column 6 is covered by both disks.
    assert_eq!(all_at_once.canvas().get(2, 6), 2);
    assert_eq!(all_at_once.canvas().get(2, 0), 1);
}

#[test]
fn loose_tolerance_merges_neighboring_coins() {
    let image = two_coins();
    let seed = Seed::new(10.0, 10.0);

    let tight = detect_coin_disk(&image, seed, &SegmentationParams::default()).unwrap();
    let loose = detect_coin_disk(&image, seed, &params(EXPLORATORY_TOLERANCE, Connectivity::Eight)).unwrap();

    assert_eq!(tight.component.area, 113);
    assert_eq!(loose.component.area, 40 * 20);
}
