use std::path::PathBuf;
use std::time::Instant;
use clap::{Parser, ValueEnum};
use rayon::prelude::*;

use coin_label_rust_lib::config::{Config, Connectivity};
use coin_label_rust_lib::errors::{CoinLabelError, Result};
use coin_label_rust_lib::image_io::{get_png_files_in_dir, load_gray_image};
use coin_label_rust_lib::pipeline::{process_image, sibling_seeds_path};
use coin_label_rust_lib::seeds::read_seeds_csv;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about = "Seed-driven coin segmentation")]
struct Args {
    /// Path to input image or directory of images
    #[clap(short, long)]
    input: Option<String>,

    /// Path to output directory
    #[clap(short, long)]
    output: Option<String>,

    /// Path to configuration file (defaults are used if it does not exist)
    #[clap(short, long, default_value = "config.toml")]
    config: String,

    /// Seed CSV (row,col) for a single input image
    #[clap(short, long)]
    seeds: Option<String>,

    /// Intensity tolerance for region growing (overwrites config)
    #[clap(short, long)]
    tolerance: Option<f64>,

    /// Pixel connectivity (overwrites config)
    #[clap(long)]
    connectivity: Option<ConnectivityArg>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConnectivityArg {
    Four,
    Eight,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut config = Config::from_file_or_default(&args.config)?;

    // Override config with command-line arguments
    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(output) = args.output {
        config.output_base_dir = output;
    }
    if let Some(seeds) = args.seeds {
        config.seeds_path = Some(seeds);
    }
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(connectivity) = args.connectivity {
        config.connectivity = match connectivity {
            ConnectivityArg::Four => Connectivity::Four,
            ConnectivityArg::Eight => Connectivity::Eight,
        };
    }

    config.validate()?;

    let start_time = Instant::now();
    let input_path = PathBuf::from(&config.input_path);

    if input_path.is_file() {
        let seeds_path = config
            .seeds_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| sibling_seeds_path(&input_path));
        let seeds = read_seeds_csv(&seeds_path)?;
        let input_image = load_gray_image(&input_path)?;
        process_image(input_image, &seeds, &config)?;
    } else if input_path.is_dir() {
        log::info!("Processing directory: {}", input_path.display());
        let png_files = get_png_files_in_dir(&input_path)?;
        log::info!("Found {} PNG files", png_files.len());

        let process_one = |path: &PathBuf| -> Result<()> {
            let seeds_path = sibling_seeds_path(path);
            if !seeds_path.is_file() {
                log::warn!("Skipping {}: no seed file {}", path.display(), seeds_path.display());
                return Ok(());
            }
            let seeds = read_seeds_csv(&seeds_path)?;
            let input_image = load_gray_image(path)?;
            process_image(input_image, &seeds, &config).map(|_| ())
        };

        let report = |path: &PathBuf, result: Result<()>| {
            if let Err(e) = result {
                log::error!("Error processing {}: {}", path.display(), e);
            }
        };

        if config.use_parallel {
            png_files.par_iter().for_each(|path| report(path, process_one(path)));
        } else {
            for path in &png_files {
                report(path, process_one(path));
            }
        }
    } else {
        return Err(CoinLabelError::InvalidPath(input_path));
    }

    log::info!("Processing completed in {:.2} seconds", start_time.elapsed().as_secs_f64());

    Ok(())
}
