//! Deterministic, engine-agnostic procedural locomotion.
//!
//! Given a character velocity and a [`TerrainQuery`], a [`WalkController`] decides every tick
//! where each foot is, whether it is planted or mid-swing, and how the pelvis settles. Its
//! output is a set of targets for an external IK or blending layer; no skeleton, animation clip
//! or physics is involved.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod binding;
pub mod controller;
pub mod error;
pub mod events;
pub mod gait;
pub mod leg;
pub mod math;
pub mod pelvis;
pub mod placement;
pub mod profile;
pub mod swing;
pub mod terrain;

pub use binding::{FootPose, JointTable, SkeletonBinding};
pub use controller::{CharacterState, WalkController};
pub use error::{BindingError, LayoutError};
pub use events::{FootEvent, FootEventKind, FootEventSink, NullEventSink, VecEventSink};
pub use gait::{BalanceSmoothing, GaitClock, GaitParameters};
pub use leg::{FootState, GaitGroups, Leg, LegLayout};
pub use math::Vec3;
pub use pelvis::PelvisBalancer;
pub use placement::{FootPlacementPredictor, StepContext};
pub use profile::{CreatureProfile, PRESET_NAMES};
pub use swing::{SwingSample, SwingTrajectoryGenerator};
pub use terrain::{Placement, ProbeConfig, TerrainAdapter};

pub use footfall_terrain::{FlatTerrain, HeightGrid, TerrainQuery, TerrainSample};
