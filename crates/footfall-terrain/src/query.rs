use std::sync::Arc;

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One on-demand answer from a [`TerrainQuery`].
///
/// Samples are plain values; callers are expected to re-query rather than keep them around
/// across ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerrainSample {
    pub height: f32,
    pub normal: Vec3,
    pub walkable: bool,
}

impl TerrainSample {
    pub fn is_finite(&self) -> bool {
        self.height.is_finite() && self.normal.is_finite()
    }

    /// Walkable and free of NaN/infinite components.
    ///
    /// Malformed samples are treated exactly like unwalkable ones.
    pub fn is_usable(&self) -> bool {
        self.walkable && self.is_finite()
    }
}

/// Read-only terrain capability consumed by the locomotion core.
///
/// Implementations must be side-effect free from the caller's point of view: the core calls
/// these many times per tick per leg, and independent characters may call them concurrently.
/// A caching implementation is responsible for its own synchronization.
///
/// Z is up. Only the horizontal components of `point` are meaningful for height and
/// walkability lookups.
pub trait TerrainQuery {
    fn height(&self, point: Vec3) -> f32;

    fn normal(&self, point: Vec3) -> Vec3;

    fn is_walkable(&self, point: Vec3) -> bool;

    fn sample(&self, point: Vec3) -> TerrainSample {
        TerrainSample {
            height: self.height(point),
            normal: self.normal(point),
            walkable: self.is_walkable(point),
        }
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for &T {
    fn height(&self, point: Vec3) -> f32 {
        (**self).height(point)
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        (**self).normal(point)
    }

    fn is_walkable(&self, point: Vec3) -> bool {
        (**self).is_walkable(point)
    }

    fn sample(&self, point: Vec3) -> TerrainSample {
        (**self).sample(point)
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for Box<T> {
    fn height(&self, point: Vec3) -> f32 {
        (**self).height(point)
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        (**self).normal(point)
    }

    fn is_walkable(&self, point: Vec3) -> bool {
        (**self).is_walkable(point)
    }

    fn sample(&self, point: Vec3) -> TerrainSample {
        (**self).sample(point)
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for Arc<T> {
    fn height(&self, point: Vec3) -> f32 {
        (**self).height(point)
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        (**self).normal(point)
    }

    fn is_walkable(&self, point: Vec3) -> bool {
        (**self).is_walkable(point)
    }

    fn sample(&self, point: Vec3) -> TerrainSample {
        (**self).sample(point)
    }
}
