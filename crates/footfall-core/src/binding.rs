//! Mapping controller output onto a named skeleton.
//!
//! The core never looks up joints itself. An engine implements [`SkeletonBinding`] against its
//! own model format, and a [`JointTable`] from the creature profile says which joint each leg
//! drives.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Target pose for one foot, ready for an IK or blending layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootPose {
    pub position: Vec3,
    /// Surface normal the foot sole should align with.
    pub normal: Vec3,
    pub planted: bool,
    pub phase: f32,
}

pub trait SkeletonBinding {
    fn place_foot(&mut self, joint: &str, pose: FootPose);

    fn offset_pelvis(&mut self, joint: &str, offset: Vec3);
}

/// Joint names driven by the controller: one pelvis joint and one foot joint per leg, in leg
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointTable {
    pub pelvis: String,
    pub feet: Vec<String>,
}

impl JointTable {
    pub fn new(pelvis: impl Into<String>, feet: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            pelvis: pelvis.into(),
            feet: feet.into_iter().map(Into::into).collect(),
        }
    }

    pub fn leg_count(&self) -> usize {
        self.feet.len()
    }
}
