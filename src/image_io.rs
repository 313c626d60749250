use std::path::{Path, PathBuf};
use std::fs;
use image::{GrayImage, ImageBuffer, ImageFormat, Luma, RgbaImage};

use crate::errors::{CoinLabelError, Result};
use crate::labeling::LabelCanvas;

/// Represents an input image with its metadata
pub struct InputImage {
    pub image: GrayImage,
    pub path: PathBuf,
    pub filename: String,
}

/// Get all PNG files from a directory (recursively)
pub fn get_png_files_in_dir<P: AsRef<Path>>(dir_path: P) -> Result<Vec<PathBuf>> {
    let dir_path = dir_path.as_ref();

    if !dir_path.exists() {
        return Err(CoinLabelError::InvalidPath(dir_path.to_path_buf()));
    }

    if !dir_path.is_dir() {
        return Err(CoinLabelError::Config(format!(
            "{} is not a directory", dir_path.display()
        )));
    }

    let mut png_files = Vec::new();
    find_png_files_recursive(dir_path, &mut png_files)?;
    png_files.sort();

    Ok(png_files)
}

/// Helper function to recursively search for PNG files
fn find_png_files_recursive(dir_path: &Path, result: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();

        if path.is_dir() {
            find_png_files_recursive(&path, result)?;
        } else if path.is_file() {
            let is_png = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("png"))
                .unwrap_or(false);
            if is_png {
                result.push(path);
            }
        }
    }

    Ok(())
}

/// Load an image and convert it to 8-bit grayscale
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> Result<InputImage> {
    let path = path.as_ref();

    let filename = path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CoinLabelError::InvalidPath(path.to_path_buf()))?
        .to_string();

    let image = image::open(path)?.to_luma8();

    Ok(InputImage {
        image,
        path: path.to_path_buf(),
        filename,
    })
}

/// Save the label canvas as a 16-bit grayscale PNG, one gray level per label
pub fn save_label_image<P: AsRef<Path>>(canvas: &LabelCanvas, path: P) -> Result<()> {
    let max_label = canvas.max_label();
    if max_label > u16::MAX as u32 {
        return Err(CoinLabelError::LabelOverflow(max_label));
    }

    let (height, width) = canvas.dimensions();
    let labels: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_fn(width, height, |x, y| Luma([canvas.get(y, x) as u16]));

    labels.save_with_format(path, ImageFormat::Png)?;

    Ok(())
}

/// Save an RGBA image to the specified path
pub fn save_overlay_image<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;

    Ok(())
}
