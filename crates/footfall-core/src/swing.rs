//! Swing trajectories: straight-line travel plus a sine lift that clears obstacles.

use std::f32::consts::PI;

use footfall_terrain::TerrainQuery;

use crate::math::Vec3;
use crate::{FootState, GaitClock, GaitParameters, TerrainAdapter};

/// Position of a swinging foot at some phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingSample {
    pub position: Vec3,
    pub offset: Vec3,
}

/// Advances mid-swing feet.
///
/// The lift curve is `sin(phase * PI) * max_lift`: zero at lift-off and touch-down with a single
/// peak at mid-swing. `max_lift` is the nominal lift plus whatever clearance the terrain along
/// the path demands.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwingTrajectoryGenerator;

impl SwingTrajectoryGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Lift above the straight swing path. Exactly zero outside the open interval `(0, 1)`.
    pub fn lift(phase: f32, max_lift: f32) -> f32 {
        if phase <= 0.0 || phase >= 1.0 {
            return 0.0;
        }
        (phase * PI).sin() * max_lift
    }

    pub fn max_lift(gait: &GaitParameters, obstacle_height: f32) -> f32 {
        gait.nominal_lift() + obstacle_height.max(0.0)
    }

    /// Clearance needed above the straight line from `start` to `end`.
    ///
    /// Terrain is sampled at evenly spaced interior points of the path and compared with the
    /// line between the endpoints' own heights. Excess up to half the step height is absorbed by
    /// the nominal lift; anything above that is returned. Malformed samples are skipped.
    pub fn obstacle_height<T: TerrainQuery>(
        terrain: &TerrainAdapter<T>,
        start: Vec3,
        end: Vec3,
        step_height: f32,
    ) -> f32 {
        let samples = terrain.probe().obstacle_samples;
        let mut max_excess = 0.0_f32;
        for i in 1..=samples {
            let t = i as f32 / (samples + 1) as f32;
            let Some(ground) = terrain.height_at(start.lerp(end, t)) else {
                continue;
            };
            let line = start.z + (end.z - start.z) * t;
            max_excess = max_excess.max(ground - line);
        }
        (max_excess - step_height * 0.5).max(0.0)
    }

    /// Interpolated position at `phase` along a swing from `start` to `end`.
    pub fn sample(start: Vec3, end: Vec3, phase: f32, max_lift: f32) -> SwingSample {
        let linear = start.lerp(end, phase.clamp(0.0, 1.0));
        let offset = Vec3::new(0.0, 0.0, Self::lift(phase, max_lift));
        SwingSample {
            position: linear + offset,
            offset,
        }
    }

    /// Advance a swinging foot by `dt`. Returns `true` on the tick the foot plants.
    pub fn advance<T: TerrainQuery>(
        &self,
        foot: &mut FootState,
        dt: f32,
        stride_duration: f32,
        gait: &GaitParameters,
        terrain: &TerrainAdapter<T>,
    ) -> bool {
        if foot.planted {
            return false;
        }
        foot.time_since_lift += dt;
        let phase = GaitClock::swing_phase(foot.time_since_lift, stride_duration);
        if phase >= 1.0 {
            foot.plant();
            return true;
        }

        let obstacle =
            Self::obstacle_height(terrain, foot.lift_origin, foot.target, gait.step_height);
        let max_lift = Self::max_lift(gait, obstacle);
        let sample = Self::sample(foot.lift_origin, foot.target, phase, max_lift);

        foot.phase = phase;
        foot.swing_offset = sample.offset;
        foot.position = sample.position;
        false
    }
}
