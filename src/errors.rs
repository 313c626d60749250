use thiserror::Error;
use std::io;
use std::path::PathBuf;

/// Custom error types for the coin labeling host
#[derive(Error, Debug)]
pub enum CoinLabelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration from {path}: {source}")]
    ConfigLoad {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input path: {0}")]
    InvalidPath(PathBuf),

    #[error("Label {0} does not fit into a 16-bit label image")]
    LabelOverflow(u32),

    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Per-seed failures of the segmentation core.
///
/// None of these reach the host: the seed orchestrator swallows them and
/// simply leaves the canvas untouched for that seed.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SegmentFailure {
    #[error("Seed ({row}, {col}) rounds to a pixel outside the image")]
    OutOfBounds { row: f64, col: f64 },

    #[error("Flood fill produced an empty region")]
    EmptyRegion,

    #[error("No connected component contains seed pixel ({row}, {col})")]
    NoComponent { row: u32, col: u32 },
}

/// Type alias for Result with our custom error type
pub type Result<T> = std::result::Result<T, CoinLabelError>;
