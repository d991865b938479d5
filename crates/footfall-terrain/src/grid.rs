use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{GridError, TerrainQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Cell {
    x: i32,
    y: i32,
}

/// A regular height field with per-cell walkability.
///
/// Cell `(x, y)` covers `[x * cell_size, (x + 1) * cell_size)` on X and the same on Y. Heights are
/// piecewise constant per cell, which keeps step edges sharp (stairs, ledges). Points outside the
/// grid are unwalkable and report the height of the nearest edge cell.
///
/// Deserialized grids go through [`HeightGrid::from_parts`], so a malformed document is rejected
/// up front instead of panicking on the first query.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawHeightGrid"))]
pub struct HeightGrid {
    width: i32,
    depth: i32,
    cell_size: f32,
    heights: Vec<f32>,
    walkable: Vec<bool>,
}

impl HeightGrid {
    /// Flat, fully walkable grid of `width x depth` cells.
    ///
    /// # Panics
    ///
    /// Panics on an empty or oversized grid, or a `cell_size` that is not a positive finite
    /// number. Use [`HeightGrid::from_parts`] to get an error instead.
    pub fn new(width: u32, depth: u32, cell_size: f32) -> Self {
        let (width, depth, len) = match checked_dims(width, depth, cell_size) {
            Ok(dims) => dims,
            Err(err) => panic!("invalid height grid: {err}"),
        };
        Self {
            width,
            depth,
            cell_size,
            heights: vec![0.0; len],
            walkable: vec![true; len],
        }
    }

    /// Build a grid from row-major cell data (`index = y * width + x`).
    pub fn from_parts(
        width: u32,
        depth: u32,
        cell_size: f32,
        heights: Vec<f32>,
        walkable: Vec<bool>,
    ) -> Result<Self, GridError> {
        let (width, depth, len) = checked_dims(width, depth, cell_size)?;
        if heights.len() != len || walkable.len() != len {
            return Err(GridError::CellCountMismatch {
                expected: len,
                heights: heights.len(),
                walkable: walkable.len(),
            });
        }
        Ok(Self {
            width,
            depth,
            cell_size,
            heights,
            walkable,
        })
    }

    /// Build a grid whose cell heights come from `height_fn(x, y)`.
    pub fn from_fn(
        width: u32,
        depth: u32,
        cell_size: f32,
        height_fn: impl Fn(u32, u32) -> f32,
    ) -> Self {
        let mut grid = Self::new(width, depth, cell_size);
        for y in 0..depth {
            for x in 0..width {
                grid.set_height(x as i32, y as i32, height_fn(x, y));
            }
        }
        grid
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn depth(&self) -> u32 {
        self.depth as u32
    }

    /// World-space extent covered by the grid on X and Y.
    pub fn extent(&self) -> (f32, f32) {
        (
            self.width as f32 * self.cell_size,
            self.depth as f32 * self.cell_size,
        )
    }

    pub fn set_height(&mut self, x: i32, y: i32, height: f32) {
        if let Some(idx) = self.idx(Cell { x, y }) {
            self.heights[idx] = height;
        }
    }

    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) {
        if let Some(idx) = self.idx(Cell { x, y }) {
            self.walkable[idx] = walkable;
        }
    }

    /// Set every cell in `[x0, x1) x [y0, y1)` to `height`. Out-of-range cells are ignored.
    pub fn fill_height(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, height: f32) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_height(x, y, height);
            }
        }
    }

    /// Mark every cell in `[x0, x1) x [y0, y1)` walkable or not. Out-of-range cells are ignored.
    pub fn fill_walkable(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, walkable: bool) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_walkable(x, y, walkable);
            }
        }
    }

    pub fn cell_height(&self, x: i32, y: i32) -> Option<f32> {
        self.idx(Cell { x, y }).map(|idx| self.heights[idx])
    }

    pub fn is_cell_walkable(&self, x: i32, y: i32) -> bool {
        self.idx(Cell { x, y })
            .map(|idx| self.walkable[idx])
            .unwrap_or(false)
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.depth
    }

    fn idx(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    fn world_to_cell(&self, p: Vec3) -> Option<Cell> {
        if !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        let cell = Cell {
            x: (p.x / self.cell_size).floor() as i32,
            y: (p.y / self.cell_size).floor() as i32,
        };
        if self.in_bounds(cell) {
            Some(cell)
        } else {
            None
        }
    }

    fn nearest_cell(&self, p: Vec3) -> Option<Cell> {
        if !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        Some(Cell {
            x: ((p.x / self.cell_size).floor() as i32).clamp(0, self.width - 1),
            y: ((p.y / self.cell_size).floor() as i32).clamp(0, self.depth - 1),
        })
    }

    fn height_of(&self, cell: Cell) -> f32 {
        self.idx(cell).map(|idx| self.heights[idx]).unwrap_or(f32::NAN)
    }

    /// Central-difference slope along one axis, falling back to one-sided differences at the
    /// grid edge.
    fn slope(&self, cell: Cell, dx: i32, dy: i32) -> f32 {
        let lo = Cell {
            x: (cell.x - dx).max(0),
            y: (cell.y - dy).max(0),
        };
        let hi = Cell {
            x: (cell.x + dx).min(self.width - 1),
            y: (cell.y + dy).min(self.depth - 1),
        };
        let cells = ((hi.x - lo.x) + (hi.y - lo.y)) as f32;
        if cells <= 0.0 {
            return 0.0;
        }
        (self.height_of(hi) - self.height_of(lo)) / (cells * self.cell_size)
    }
}

/// Validated `(width, depth, cell count)`.
fn checked_dims(width: u32, depth: u32, cell_size: f32) -> Result<(i32, i32, usize), GridError> {
    let invalid = GridError::InvalidDimensions { width, depth };
    if width == 0 || depth == 0 {
        return Err(invalid);
    }
    let (Ok(w), Ok(d)) = (i32::try_from(width), i32::try_from(depth)) else {
        return Err(invalid);
    };
    let len = (width as usize)
        .checked_mul(depth as usize)
        .ok_or(invalid)?;
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(GridError::InvalidCellSize { cell_size });
    }
    Ok((w, d, len))
}

/// Wire form of [`HeightGrid`], checked before use.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawHeightGrid {
    width: i64,
    depth: i64,
    cell_size: f32,
    heights: Vec<f32>,
    walkable: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawHeightGrid> for HeightGrid {
    type Error = GridError;

    fn try_from(raw: RawHeightGrid) -> Result<Self, Self::Error> {
        let dim = |v: i64| u32::try_from(v).unwrap_or(0);
        let (width, depth) = (dim(raw.width), dim(raw.depth));
        if i64::from(width) != raw.width || i64::from(depth) != raw.depth {
            return Err(GridError::InvalidDimensions { width, depth });
        }
        Self::from_parts(width, depth, raw.cell_size, raw.heights, raw.walkable)
    }
}

impl TerrainQuery for HeightGrid {
    fn height(&self, point: Vec3) -> f32 {
        match self.nearest_cell(point) {
            Some(cell) => self.height_of(cell),
            None => f32::NAN,
        }
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        let Some(cell) = self.nearest_cell(point) else {
            return Vec3::splat(f32::NAN);
        };
        let dhdx = self.slope(cell, 1, 0);
        let dhdy = self.slope(cell, 0, 1);
        Vec3::new(-dhdx, -dhdy, 1.0).normalize_or(Vec3::Z)
    }

    fn is_walkable(&self, point: Vec3) -> bool {
        self.world_to_cell(point)
            .and_then(|cell| self.idx(cell))
            .map(|idx| self.walkable[idx])
            .unwrap_or(false)
    }
}
