//! Built-in terrain scenarios for headless runs.
//!
//! Every scenario is a 60 x 200 grid of 10-unit cells. Characters start near the south edge at
//! [`START`] and are expected to walk north (+Y).

use anyhow::{bail, Result};
use footfall_core::{HeightGrid, Vec3};

pub const NAMES: [&str; 3] = ["flat", "stairs", "gap"];

pub const START: Vec3 = Vec3::new(300.0, 100.0, 0.0);

const WIDTH: u32 = 60;
const DEPTH: u32 = 200;
const CELL: f32 = 10.0;

/// First row of the first stair.
const STAIR_START_ROW: u32 = 30;
const STAIR_ROWS: u32 = 5;
const STAIR_RISE: f32 = 8.0;
const STAIR_COUNT: u32 = 10;

/// Rows `[GAP_START_ROW, GAP_END_ROW)` are an unwalkable ditch.
const GAP_START_ROW: i32 = 60;
const GAP_END_ROW: i32 = 64;
const GAP_DEPTH: f32 = -50.0;

pub fn build(name: &str) -> Result<HeightGrid> {
    let grid = match name {
        "flat" => HeightGrid::new(WIDTH, DEPTH, CELL),
        "stairs" => HeightGrid::from_fn(WIDTH, DEPTH, CELL, |_, y| stair_height(y)),
        "gap" => {
            let mut grid = HeightGrid::new(WIDTH, DEPTH, CELL);
            grid.fill_height(0, GAP_START_ROW, WIDTH as i32, GAP_END_ROW, GAP_DEPTH);
            grid.fill_walkable(0, GAP_START_ROW, WIDTH as i32, GAP_END_ROW, false);
            grid
        }
        other => bail!("unknown terrain scenario '{other}' (expected one of {NAMES:?})"),
    };
    Ok(grid)
}

fn stair_height(row: u32) -> f32 {
    if row < STAIR_START_ROW {
        return 0.0;
    }
    let step = ((row - STAIR_START_ROW) / STAIR_ROWS + 1).min(STAIR_COUNT);
    step as f32 * STAIR_RISE
}
