// src/lib.rs - Library interface for coin labeling

pub mod components;
pub mod config;
pub mod disk;
pub mod errors;
pub mod flood;
pub mod image_io;
pub mod image_utils;
pub mod labeling;
pub mod output;
pub mod overlay;
pub mod pipeline;
pub mod seeds;
pub mod shape_analysis;

// Re-export commonly used types and functions
pub use errors::{CoinLabelError, Result, SegmentFailure};
pub use config::{Config, Connectivity, SegmentationParams, DEFAULT_TOLERANCE, EXPLORATORY_TOLERANCE};
pub use pipeline::process_image;
pub use image_io::{InputImage, load_gray_image, save_label_image};
pub use seeds::{Seed, SeedList, read_seeds_csv};
pub use image_utils::{BinaryMask, PixelCoord};

// Segmentation core
pub use flood::{grow, seed_pixel};
pub use components::{find_components, select, BoundingBox, Component};
pub use shape_analysis::{
    equivalent_diameter,
    label_statistics,
    summarize,
    LabelStats,
    ShapeSummary,
};
pub use disk::{disk_geometry, rasterize, DiskGeometry};
pub use labeling::{
    detect_coin_disk,
    process_new_seeds,
    seed_label,
    DiskFit,
    LabelCanvas,
    LabelSession,
    ProcessedSeeds,
};
