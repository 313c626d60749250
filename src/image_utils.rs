use image::{GrayImage, Luma, Primitive};
use num_traits::ToPrimitive;

/// Constants
pub const MASK_ON: u8 = 255; // Value of a set pixel in a mask image
pub const MASK_OFF: u8 = 0;

/// Integer pixel position, row-major like the label canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub row: u32,
    pub col: u32,
}

impl PixelCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Boolean grid with the dimensions of the image it was derived from.
///
/// Backed by a `GrayImage` so it can be handed to `imageproc` directly;
/// pixels are either `MASK_ON` or `MASK_OFF`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryMask {
    pixels: GrayImage,
}

impl BinaryMask {
    /// Create an all-clear mask of `height` rows and `width` columns
    pub fn new(height: u32, width: u32) -> Self {
        Self {
            pixels: GrayImage::from_pixel(width, height, Luma([MASK_OFF])),
        }
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// (height, width)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.height(), self.width())
    }

    /// Whether the pixel is set; coordinates outside the grid read as clear
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> bool {
        row < self.height() && col < self.width() && self.pixels.get_pixel(col, row)[0] == MASK_ON
    }

    #[inline]
    pub(crate) fn set(&mut self, row: u32, col: u32) {
        self.pixels.put_pixel(col, row, Luma([MASK_ON]));
    }

    /// Number of set pixels
    pub fn count(&self) -> usize {
        self.pixels.pixels().filter(|p| p[0] == MASK_ON).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.pixels.pixels().any(|p| p[0] == MASK_ON)
    }

    /// Iterate the set pixels in row-major order
    pub fn iter_set(&self) -> impl Iterator<Item = PixelCoord> + '_ {
        self.pixels
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] == MASK_ON)
            .map(|(x, y, _)| PixelCoord::new(y, x))
    }

    pub fn as_gray_image(&self) -> &GrayImage {
        &self.pixels
    }
}

/// Check if a signed (row, col) position is inside a grid of the given size
#[inline]
pub fn in_bounds(row: i64, col: i64, height: u32, width: u32) -> bool {
    row >= 0 && col >= 0 && row < height as i64 && col < width as i64
}

/// Read a grayscale sample as `f64` for tolerance comparisons
#[inline]
pub fn intensity<T: Primitive>(pixel: &Luma<T>) -> f64 {
    pixel.0[0].to_f64().unwrap_or(f64::NAN)
}
