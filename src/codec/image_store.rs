//! PNG storage for grids
//!
//! Images are 8-bit grayscale. Grid cell `(row, col)` lives at pixel `x = row, y = col`,
//! so the first row of text runs down the first pixel column.

use crate::codec::raster::Grid;
use crate::error::RasterError;
use image::{DynamicImage, GrayImage, ImageFormat, ImageReader, Luma};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Save `grid` as a grayscale PNG at `path`
///
/// The image is encoded to a sibling temporary file and renamed into place, so a failure
/// never leaves a truncated image behind.
#[instrument(skip_all, fields(path = %path.display(), side = grid.side()))]
pub fn save(grid: &Grid, path: &Path) -> Result<(), RasterError> {
    if grid.side() == 0 {
        return Err(RasterError::Empty);
    }
    let side = u32::try_from(grid.side()).map_err(|_| RasterError::BufferSize {
        expected: u32::MAX as usize,
        actual: grid.side(),
    })?;

    let mut img = GrayImage::new(side, side);
    for (index, &value) in grid.pixels().iter().enumerate() {
        let row = (index / grid.side()) as u32;
        let col = (index % grid.side()) as u32;
        img.put_pixel(row, col, Luma([value]));
    }

    let tmp = temp_path(path);
    if let Err(e) = img.save_with_format(&tmp, ImageFormat::Png) {
        if let Err(cleanup) = std::fs::remove_file(&tmp) {
            warn!(path = %tmp.display(), "Failed to remove temporary image: {}", cleanup);
        }
        return Err(e.into());
    }
    std::fs::rename(&tmp, path)?;
    debug!("Saved image");
    Ok(())
}

/// Load a grayscale PNG as a grid
///
/// The format is detected from the file contents, not the extension.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Grid, RasterError> {
    let decoded = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let img = match decoded {
        DynamicImage::ImageLuma8(img) => img,
        other => return Err(RasterError::UnsupportedColor(format!("{:?}", other.color()))),
    };

    let (width, height) = img.dimensions();
    if width != height {
        return Err(RasterError::NotSquare { width, height });
    }

    let side = width as usize;
    let mut pixels = vec![0u8; side * side];
    for (x, y, pixel) in img.enumerate_pixels() {
        pixels[x as usize * side + y as usize] = pixel.0[0];
    }
    debug!(side, "Loaded image");
    Grid::from_raw(width, height, pixels)
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
