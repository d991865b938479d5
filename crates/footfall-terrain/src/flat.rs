use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TerrainQuery;

/// An infinite horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlatTerrain {
    pub height: f32,
    pub walkable: bool,
}

impl FlatTerrain {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            walkable: true,
        }
    }

    /// A plane nothing may stand on; useful for exercising placement failure paths.
    pub fn unwalkable(height: f32) -> Self {
        Self {
            height,
            walkable: false,
        }
    }
}

impl Default for FlatTerrain {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl TerrainQuery for FlatTerrain {
    fn height(&self, _point: Vec3) -> f32 {
        self.height
    }

    fn normal(&self, _point: Vec3) -> Vec3 {
        Vec3::Z
    }

    fn is_walkable(&self, _point: Vec3) -> bool {
        self.walkable
    }
}
