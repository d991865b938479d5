use thiserror::Error;

/// Rejected [`HeightGrid`](crate::HeightGrid) construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid of {width}x{depth} cells is empty or too large")]
    InvalidDimensions { width: u32, depth: u32 },

    #[error("cell size {cell_size} is not a positive finite number")]
    InvalidCellSize { cell_size: f32 },

    #[error("grid needs {expected} cells but got {heights} heights and {walkable} walkable flags")]
    CellCountMismatch {
        expected: usize,
        heights: usize,
        walkable: usize,
    },
}
