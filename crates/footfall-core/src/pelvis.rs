//! Pelvis settling from the set of planted feet.

use crate::math::Vec3;
use crate::Leg;

/// Smoothed pelvis offset.
///
/// Only the vertical component is driven: it eases toward the mean planted-foot height plus half
/// the body height. Lateral weight shift is left to consumers; [`PelvisBalancer::support_centroid`]
/// gives them the planted support point to build it on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PelvisBalancer {
    offset: Vec3,
}

impl PelvisBalancer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Mean height of planted feet plus half the body height, or `None` while no foot is planted.
    pub fn target_height(legs: &[Leg], body_height: f32) -> Option<f32> {
        let mut total = 0.0_f32;
        let mut planted = 0_usize;
        for leg in legs.iter().filter(|leg| leg.foot.planted) {
            total += leg.foot.position.z;
            planted += 1;
        }
        if planted == 0 {
            return None;
        }
        Some(total / planted as f32 + body_height * 0.5)
    }

    /// Mean planted-foot position, the centre of the support polygon's vertices.
    pub fn support_centroid(legs: &[Leg]) -> Option<Vec3> {
        let mut total = Vec3::ZERO;
        let mut planted = 0_usize;
        for leg in legs.iter().filter(|leg| leg.foot.planted) {
            total += leg.foot.position;
            planted += 1;
        }
        (planted > 0).then(|| total / planted as f32)
    }

    /// Ease toward the target by `blend` (fraction of the remaining error, `0..=1`).
    ///
    /// With every foot mid-swing there is no support to settle on and the offset holds.
    pub fn update(&mut self, legs: &[Leg], body_height: f32, blend: f32) {
        let Some(target) = Self::target_height(legs, body_height) else {
            return;
        };
        let blend = blend.clamp(0.0, 1.0);
        self.offset.z += (target - self.offset.z) * blend;
    }

    /// Jump straight to the target.
    pub fn settle(&mut self, legs: &[Leg], body_height: f32) {
        self.update(legs, body_height, 1.0);
    }
}
