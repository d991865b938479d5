//! Terrain query capability and reference terrains for procedural locomotion.
//!
//! The locomotion core never raycasts or owns collision; it only asks the three questions on
//! [`TerrainQuery`]. Engines implement the trait against their own world representation. The
//! reference terrains here are meant for tests, tooling and headless simulation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod flat;
pub mod grid;
pub mod query;

pub use error::GridError;
pub use flat::FlatTerrain;
pub use glam::Vec3;
pub use grid::HeightGrid;
pub use query::{TerrainQuery, TerrainSample};
