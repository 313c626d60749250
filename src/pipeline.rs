// src/pipeline.rs - Batch host: run a labeling session per image and write results

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::Result;
use crate::image_io::{save_label_image, save_overlay_image, InputImage};
use crate::labeling::{LabelCanvas, LabelSession};
use crate::output::write_label_summary_csv;
use crate::overlay::render_label_overlay;
use crate::seeds::SeedList;
use crate::shape_analysis::label_statistics;

/// Seed file expected next to an image in directory mode: `<stem>.csv`
pub fn sibling_seeds_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("csv")
}

/// Label one image from its seeds and write labels, overlay and summary.
///
/// Outputs land in `<output_base_dir>/{labels,overlay,summary}/<filename>`.
pub fn process_image(input: InputImage, seeds: &SeedList, config: &Config) -> Result<LabelCanvas> {
    let InputImage { image, path, filename } = input;
    let params = config.segmentation_params();

    log::info!(
        "Labeling {} ({} seeds, tolerance {}, {:?} connectivity)",
        path.display(), seeds.len(), params.tolerance, params.connectivity
    );

    let mut session = LabelSession::new(&image, params);
    session.process_new_seeds(seeds);
    let canvas = session.into_canvas();

    let stats = label_statistics(&canvas);
    let skipped = seeds.len().saturating_sub(stats.len());
    if skipped > 0 {
        log::info!("{}: {} of {} seeds produced no visible label", filename, skipped, seeds.len());
    }

    let base_dir = PathBuf::from(&config.output_base_dir);
    let labels_dir = base_dir.join("labels");
    let overlay_dir = base_dir.join("overlay");
    std::fs::create_dir_all(&labels_dir)?;
    std::fs::create_dir_all(&overlay_dir)?;

    save_label_image(&canvas, labels_dir.join(format!("{}.png", filename)))?;

    let overlay = render_label_overlay(&image, &canvas, config.overlay_alpha)?;
    save_overlay_image(&overlay, overlay_dir.join(format!("{}.png", filename)))?;

    write_label_summary_csv(&stats, base_dir.join("summary").join(format!("{}.csv", filename)))?;

    log::debug!("{}: {} labeled pixels, {} labels", filename, canvas.labeled_count(), stats.len());

    Ok(canvas)
}
