//! Per-creature configuration records.
//!
//! Everything that differs between creatures (leg layout, gait tuning, probe budget, joint
//! names) lives in one [`CreatureProfile`] chosen at construction. The controller itself has no
//! creature-specific branches.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::Vec3;
use crate::{GaitParameters, JointTable, LegLayout, ProbeConfig};

/// Names accepted by [`CreatureProfile::preset`].
pub const PRESET_NAMES: [&str; 4] = ["biped", "tall_biped", "quadruped", "hexapod"];

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreatureProfile {
    pub name: String,
    /// Standing body height; the pelvis rests at half of it above the feet.
    pub height: f32,
    pub radius: f32,
    pub layout: LegLayout,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gait: GaitParameters,
    #[cfg_attr(feature = "serde", serde(default))]
    pub probe: ProbeConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub joints: JointTable,
}

impl CreatureProfile {
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "biped" => Some(Self::biped()),
            "tall_biped" => Some(Self::tall_biped()),
            "quadruped" => Some(Self::quadruped()),
            "hexapod" => Some(Self::hexapod()),
            _ => None,
        }
    }

    /// Human-sized biped with alternating single-leg steps.
    pub fn biped() -> Self {
        Self {
            name: "biped".to_owned(),
            height: 180.0,
            radius: 30.0,
            layout: LegLayout::new(vec![Vec3::new(-20.0, 0.0, 0.0), Vec3::new(20.0, 0.0, 0.0)]),
            gait: GaitParameters {
                step_height: 18.0,
                ..GaitParameters::default()
            },
            probe: ProbeConfig::default(),
            joints: JointTable::new("pelvis", ["leg_left_foot", "leg_right_foot"]),
        }
    }

    /// Taller, longer-striding biped with a high step.
    pub fn tall_biped() -> Self {
        Self {
            name: "tall_biped".to_owned(),
            height: 220.0,
            radius: 35.0,
            layout: LegLayout::new(vec![Vec3::new(-25.0, 0.0, 10.0), Vec3::new(25.0, 0.0, 10.0)]),
            gait: GaitParameters {
                stride_length_multiplier: 0.6,
                lift_height_multiplier: 1.2,
                step_height: 24.0,
                ..GaitParameters::default()
            },
            probe: ProbeConfig::default(),
            joints: JointTable::new("pelvis", ["leg_left_foot", "leg_right_foot"]),
        }
    }

    /// Four legs at `(±r, ±r/2)` stepping in diagonal pairs.
    pub fn quadruped() -> Self {
        let r = 30.0;
        Self {
            name: "quadruped".to_owned(),
            height: 180.0,
            radius: r,
            layout: LegLayout::new(vec![
                Vec3::new(-r, r * 0.5, 0.0),
                Vec3::new(r, r * 0.5, 0.0),
                Vec3::new(-r, -r * 0.5, 0.0),
                Vec3::new(r, -r * 0.5, 0.0),
            ]),
            gait: GaitParameters::default(),
            probe: ProbeConfig::default(),
            joints: JointTable::new(
                "pelvis",
                [
                    "leg_front_left_foot",
                    "leg_front_right_foot",
                    "leg_back_left_foot",
                    "leg_back_right_foot",
                ],
            ),
        }
    }

    /// Low-slung six-legged crawler using the alternating tripod gait.
    ///
    /// Legs are ordered front, middle, back; left before right.
    pub fn hexapod() -> Self {
        let hip_offsets = (0..6)
            .map(|i| {
                let pair = (i / 2) as f32;
                let side = if i % 2 == 0 { -30.0 } else { 30.0 };
                Vec3::new(side, 60.0 - 60.0 * pair, -20.0)
            })
            .collect();
        Self {
            name: "hexapod".to_owned(),
            height: 120.0,
            radius: 40.0,
            layout: LegLayout::new(hip_offsets),
            gait: GaitParameters {
                lift_height_multiplier: 0.8,
                step_height: 12.0,
                ..GaitParameters::default()
            },
            probe: ProbeConfig::default(),
            joints: JointTable::new(
                "abdomen",
                [
                    "leg_front_left_foot",
                    "leg_front_right_foot",
                    "leg_mid_left_foot",
                    "leg_mid_right_foot",
                    "leg_back_left_foot",
                    "leg_back_right_foot",
                ],
            ),
        }
    }
}
