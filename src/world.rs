use crate::error::{RaycastError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

/// Immutable occupancy grid, row-major (`x + y * width`)
#[derive(Debug, Clone)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl GridMap {
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        let expected = width.checked_mul(height);
        if width == 0 || height == 0 || expected != Some(cells.len()) {
            return Err(RaycastError::MapShape {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse a text layout. Line breaks are ignored; `wall` marks a wall
    /// cell and every other character is open.
    pub fn parse(layout: &str, width: usize, height: usize, wall: char) -> Result<Self> {
        let cells = layout
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .map(|c| if c == wall { Cell::Wall } else { Cell::Open })
            .collect();
        Self::new(width, height, cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at the given coordinates, `None` outside the grid
    #[inline]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[x + y * self.width])
    }

    /// Out-of-bounds coordinates are never open.
    #[inline]
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        matches!(self.cell_at(x, y), Some(Cell::Open))
    }

    /// Open check for a real-valued point, flooring to its containing cell.
    /// Non-finite coordinates are not open.
    #[inline]
    pub fn is_open_at(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        self.is_open(x.floor() as i32, y.floor() as i32)
    }

    /// Pixels per cell (x, y) when the whole map spans an image
    pub fn cell_size_px(&self, image_width: usize, image_height: usize) -> (f32, f32) {
        (
            image_width as f32 / self.width as f32,
            image_height as f32 / self.height as f32,
        )
    }
}
