//! Boundary between the locomotion core and the external terrain capability.

use std::f32::consts::TAU;

use footfall_terrain::{TerrainQuery, TerrainSample};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::{with_height, Vec3};

pub const MAX_SEARCH_STEPS: u32 = 64;
pub const MAX_OBSTACLE_SAMPLES: u32 = 64;

/// Terrain sampling budget for one character.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProbeConfig {
    /// Radius of the fallback ring searched around an unwalkable candidate.
    pub search_radius: f32,
    /// Points on the fallback ring, visited in increasing angle from +X.
    pub search_steps: u32,
    /// Interior points sampled along a swing path for obstacle clearance.
    pub obstacle_samples: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            search_radius: 50.0,
            search_steps: 8,
            obstacle_samples: 5,
        }
    }
}

impl ProbeConfig {
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            search_radius: if self.search_radius.is_finite() {
                self.search_radius.max(0.0)
            } else {
                defaults.search_radius
            },
            search_steps: self.search_steps.min(MAX_SEARCH_STEPS),
            obstacle_samples: self.obstacle_samples.clamp(1, MAX_OBSTACLE_SAMPLES),
        }
    }
}

/// A resolved foot placement on the terrain surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Wraps a [`TerrainQuery`] and turns raw answers into checked placements.
///
/// Non-finite heights or normals are never let through: every accessor reports them as `None`,
/// exactly as if the point were unwalkable.
#[derive(Debug, Clone)]
pub struct TerrainAdapter<T> {
    query: T,
    probe: ProbeConfig,
}

impl<T: TerrainQuery> TerrainAdapter<T> {
    pub fn new(query: T, probe: ProbeConfig) -> Self {
        Self {
            query,
            probe: probe.sanitized(),
        }
    }

    pub fn query(&self) -> &T {
        &self.query
    }

    pub fn probe(&self) -> ProbeConfig {
        self.probe
    }

    pub fn set_probe(&mut self, probe: ProbeConfig) {
        self.probe = probe.sanitized();
    }

    /// Finite sample at `point`, walkable or not.
    pub fn sample(&self, point: Vec3) -> Option<TerrainSample> {
        if !point.is_finite() {
            return None;
        }
        let sample = self.query.sample(point);
        sample.is_finite().then_some(sample)
    }

    pub fn height_at(&self, point: Vec3) -> Option<f32> {
        if !point.is_finite() {
            return None;
        }
        let height = self.query.height(point);
        height.is_finite().then_some(height)
    }

    /// `point` snapped onto the surface, ignoring walkability. Used to keep planted feet on
    /// the ground they already stand on.
    pub fn surface_at(&self, point: Vec3) -> Option<Placement> {
        self.sample(point).map(|s| Placement {
            position: with_height(point, s.height),
            normal: s.normal,
        })
    }

    /// `point` snapped onto the surface if it is walkable and well-formed.
    pub fn try_plant(&self, point: Vec3) -> Option<Placement> {
        self.sample(point)
            .filter(|s| s.walkable)
            .map(|s| Placement {
                position: with_height(point, s.height),
                normal: s.normal,
            })
    }

    /// Resolve `candidate` to a plantable point: the candidate itself if walkable, otherwise
    /// the first walkable point on the fallback ring. `None` when nothing nearby is walkable.
    pub fn resolve_plant_position(&self, candidate: Vec3) -> Option<Placement> {
        if !candidate.is_finite() {
            return None;
        }
        self.try_plant(candidate)
            .or_else(|| self.ring_points(candidate).find_map(|p| self.try_plant(p)))
    }

    /// Fallback ring around `center`, in search order.
    pub fn ring_points(&self, center: Vec3) -> impl Iterator<Item = Vec3> {
        let steps = self.probe.search_steps;
        let radius = self.probe.search_radius;
        (0..steps).map(move |i| {
            let angle = TAU * i as f32 / steps as f32;
            center + Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
        })
    }
}
