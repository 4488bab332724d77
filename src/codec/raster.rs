//! Text ↔ square byte grid
//!
//! Each char becomes one intensity value. Only code points `0..=255` fit; anything larger is
//! rejected instead of being truncated.

use crate::codec::padding::isqrt;
use crate::error::RasterError;

/// Square grid of byte intensities, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    pixels: Vec<u8>,
}

impl Grid {
    /// Build a grid from raw pixel data, checking that it is square and fully populated
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        if width != height {
            return Err(RasterError::NotSquare { width, height });
        }
        let side = width as usize;
        let expected = side * side;
        if pixels.len() != expected {
            return Err(RasterError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { side, pixels })
    }

    /// Side length in pixels
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.side && col < self.side {
            Some(self.pixels[row * self.side + col])
        } else {
            None
        }
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Map a perfect-square-length string onto a grid
pub fn encode(text: &str) -> Result<Grid, RasterError> {
    let len = text.chars().count();
    let side = isqrt(len);
    if side * side != len {
        return Err(RasterError::NotPerfectSquare { len });
    }

    let pixels = text
        .chars()
        .enumerate()
        .map(|(index, c)| {
            u8::try_from(u32::from(c)).map_err(|_| RasterError::OutOfRange {
                index,
                code_point: u32::from(c),
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(Grid { side, pixels })
}

/// Flatten a grid back into text, one char per pixel
pub fn decode(grid: &Grid) -> String {
    grid.pixels.iter().map(|&b| char::from(b)).collect()
}
