use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{CoinLabelError, Result};

/// Tolerance used when labeling seeds; tight enough that touching coins are
/// not merged into one region.
pub const DEFAULT_TOLERANCE: f64 = 30.0;

/// Loose tolerance for previewing what a seed would grow into.
pub const EXPLORATORY_TOLERANCE: f64 = 200.0;

/// Configuration for the coin labeling host
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_input_path")]
    pub input_path: String,

    #[serde(default = "default_output_base_dir")]
    pub output_base_dir: String,

    /// Seed CSV for single-image runs; directories use `<stem>.csv` siblings
    #[serde(default)]
    pub seeds_path: Option<String>,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default)]
    pub connectivity: Connectivity,

    #[serde(default = "default_overlay_alpha")]
    pub overlay_alpha: f32,

    #[serde(default = "default_parallel")]
    pub use_parallel: bool,
}

/// Pixel adjacency shared by the flood fill and the component labeling
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connectivity {
    /// Edge neighbors only
    Four,
    /// Edge and corner neighbors
    #[default]
    Eight,
}

impl Connectivity {
    /// Neighbor offsets as (row, col) deltas
    pub fn offsets(self) -> &'static [(i64, i64)] {
        const FOUR: [(i64, i64); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
        const EIGHT: [(i64, i64); 8] = [
            (-1, -1), (-1, 0), (-1, 1),
            (0, -1),           (0, 1),
            (1, -1),  (1, 0),  (1, 1),
        ];
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

impl From<Connectivity> for imageproc::region_labelling::Connectivity {
    fn from(value: Connectivity) -> Self {
        match value {
            Connectivity::Four => imageproc::region_labelling::Connectivity::Four,
            Connectivity::Eight => imageproc::region_labelling::Connectivity::Eight,
        }
    }
}

/// Parameters of one segmentation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationParams {
    pub tolerance: f64,
    pub connectivity: Connectivity,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            connectivity: Connectivity::default(),
        }
    }
}

fn default_input_path() -> String {
    "./input".to_string()
}

fn default_output_base_dir() -> String {
    "./output".to_string()
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_overlay_alpha() -> f32 {
    0.5
}

fn default_parallel() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_base_dir: default_output_base_dir(),
            seeds_path: None,
            tolerance: DEFAULT_TOLERANCE,
            connectivity: Connectivity::default(),
            overlay_alpha: default_overlay_alpha(),
            use_parallel: default_parallel(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CoinLabelError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|source| CoinLabelError::ConfigLoad {
            source,
            path: path.to_path_buf(),
        })
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn segmentation_params(&self) -> SegmentationParams {
        SegmentationParams {
            tolerance: self.tolerance,
            connectivity: self.connectivity,
        }
    }

    /// Check parameter ranges without touching the filesystem
    pub fn validate_params(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(CoinLabelError::Config(
                "tolerance must be a finite value >= 0.0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            return Err(CoinLabelError::Config(
                "overlay_alpha must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate configuration and create the output directories
    pub fn validate(&self) -> Result<()> {
        self.validate_params()?;

        let input_path = PathBuf::from(&self.input_path);
        if !input_path.exists() {
            return Err(CoinLabelError::InvalidPath(input_path));
        }

        if let Some(seeds) = &self.seeds_path {
            let seeds = PathBuf::from(seeds);
            if !seeds.is_file() {
                return Err(CoinLabelError::InvalidPath(seeds));
            }
        }

        let base_dir = PathBuf::from(&self.output_base_dir);
        for sub in ["labels", "overlay", "summary"] {
            fs::create_dir_all(base_dir.join(sub))?;
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            CoinLabelError::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content)?;

        Ok(())
    }
}
