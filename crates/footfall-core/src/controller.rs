//! Per-character orchestration of clock, placement, swing, snapping and balance.

use footfall_terrain::TerrainQuery;

use crate::math::{finite_or_zero, Vec3};
use crate::{
    BindingError, CreatureProfile, FootEvent, FootEventKind, FootEventSink, FootPlacementPredictor,
    FootPose, FootState, GaitClock, GaitGroups, GaitParameters, JointTable, LayoutError, Leg,
    LegLayout, PelvisBalancer, Placement, ProbeConfig, SkeletonBinding, StepContext,
    SwingTrajectoryGenerator, TerrainAdapter,
};

/// Kinematic state of the character body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub height: f32,
    pub radius: f32,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            height: 180.0,
            radius: 30.0,
        }
    }
}

impl CharacterState {
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    fn integrate(&mut self, velocity: Vec3, dt: f32) {
        self.acceleration = if dt > 0.0 {
            (velocity - self.velocity) / dt
        } else {
            Vec3::ZERO
        };
        self.velocity = velocity;
        self.position += velocity * dt;
    }
}

/// Procedural walk controller for one character.
///
/// Each character owns its own controller; nothing is shared between instances except the
/// terrain capability `T`, which is only ever read. All per-leg state is allocated at
/// construction, so [`tick`](WalkController::tick) does not allocate.
///
/// ```
/// use footfall_core::{CreatureProfile, FlatTerrain, Vec3, WalkController};
///
/// let mut walker =
///     WalkController::from_profile(FlatTerrain::default(), &CreatureProfile::biped()).unwrap();
/// for _ in 0..120 {
///     walker.tick(1.0 / 60.0, Vec3::new(0.0, 100.0, 0.0));
/// }
/// assert!(walker.character().position.y > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct WalkController<T> {
    terrain: TerrainAdapter<T>,
    gait: GaitParameters,
    character: CharacterState,
    clock: GaitClock,
    groups: GaitGroups,
    legs: Vec<Leg>,
    predictor: FootPlacementPredictor,
    swing: SwingTrajectoryGenerator,
    pelvis: PelvisBalancer,
    stride_duration: f32,
    events: Vec<FootEvent>,
}

impl<T: TerrainQuery> WalkController<T> {
    /// Build legs from `layout` and stand the character at the origin with every foot planted
    /// under its hip.
    pub fn new(terrain: T, layout: &LegLayout, gait: GaitParameters) -> Result<Self, LayoutError> {
        Self::with_body(
            terrain,
            layout,
            gait,
            ProbeConfig::default(),
            CharacterState::default(),
        )
    }

    pub fn from_profile(terrain: T, profile: &CreatureProfile) -> Result<Self, LayoutError> {
        let character = CharacterState {
            height: profile.height,
            radius: profile.radius,
            ..CharacterState::default()
        };
        Self::with_body(terrain, &profile.layout, profile.gait, profile.probe, character)
    }

    fn with_body(
        terrain: T,
        layout: &LegLayout,
        gait: GaitParameters,
        probe: ProbeConfig,
        character: CharacterState,
    ) -> Result<Self, LayoutError> {
        let groups = layout.resolve()?;
        let gait = gait.sanitized();
        let leg_count = layout.leg_count();
        let mut controller = Self {
            terrain: TerrainAdapter::new(terrain, probe),
            gait,
            character,
            clock: GaitClock::new(&groups),
            legs: Vec::with_capacity(leg_count),
            predictor: FootPlacementPredictor::new(leg_count),
            swing: SwingTrajectoryGenerator::new(),
            pelvis: PelvisBalancer::new(),
            stride_duration: gait.stride_duration(character.speed()),
            events: Vec::with_capacity(leg_count * 2),
            groups,
        };
        controller.build_legs(layout);
        Ok(controller)
    }

    /// Tear down and rebuild legs for a new layout and gait. The character keeps its position;
    /// velocity and timing restart from rest.
    pub fn reinitialize(
        &mut self,
        layout: &LegLayout,
        gait: GaitParameters,
    ) -> Result<(), LayoutError> {
        let groups = layout.resolve()?;
        let leg_count = layout.leg_count();
        self.gait = gait.sanitized();
        self.clock = GaitClock::new(&groups);
        self.groups = groups;
        self.predictor = FootPlacementPredictor::new(leg_count);
        self.pelvis = PelvisBalancer::new();
        self.character.velocity = Vec3::ZERO;
        self.character.acceleration = Vec3::ZERO;
        self.stride_duration = self.gait.stride_duration(0.0);
        self.events = Vec::with_capacity(leg_count * 2);
        self.build_legs(layout);
        Ok(())
    }

    fn build_legs(&mut self, layout: &LegLayout) {
        self.legs.clear();
        for (i, &hip_offset) in layout.hip_offsets.iter().enumerate() {
            self.legs.push(Leg::new(
                hip_offset,
                self.groups.group_of(i),
                FootState::at_rest(Vec3::ZERO, Vec3::Z),
            ));
        }
        self.rest_at(self.character.position);
    }

    /// Move the character to `position` and plant every foot under its hip, cancelling any
    /// swing in progress.
    pub fn rest_at(&mut self, position: Vec3) {
        self.character.position = finite_or_zero(position);
        for leg in &mut self.legs {
            let hip = leg.hip_anchor(self.character.position);
            let rest = self.terrain.surface_at(hip).unwrap_or(Placement {
                position: hip,
                normal: Vec3::Z,
            });
            leg.foot = FootState::at_rest(rest.position, rest.normal);
        }
        self.pelvis.settle(&self.legs, self.character.height);
    }

    /// Advance the simulation by `dt_seconds` with the character moving at `target_velocity`.
    ///
    /// Non-finite or negative `dt_seconds` is treated as zero; a non-finite velocity as standing
    /// still.
    pub fn tick(&mut self, dt_seconds: f32, target_velocity: Vec3) {
        let dt = if dt_seconds.is_finite() {
            dt_seconds.max(0.0)
        } else {
            0.0
        };
        let velocity = finite_or_zero(target_velocity);

        self.events.clear();
        self.clock.advance(dt);
        self.character.integrate(velocity, dt);
        self.stride_duration = self.gait.stride_duration(self.character.speed());

        for leg in &mut self.legs {
            leg.foot.previous_position = leg.foot.position;
        }

        let ctx = StepContext {
            tick: self.clock.tick(),
            position: self.character.position,
            velocity: self.character.velocity,
            stride_duration: self.stride_duration,
        };
        self.predictor.plan(
            &ctx,
            &self.gait,
            &mut self.legs,
            &self.groups,
            &mut self.clock,
            &self.terrain,
            &mut self.events,
        );

        for (i, leg) in self.legs.iter_mut().enumerate() {
            if !leg.foot.is_swinging() {
                continue;
            }
            let planted = self.swing.advance(
                &mut leg.foot,
                dt,
                self.stride_duration,
                &self.gait,
                &self.terrain,
            );
            if planted {
                tracing::trace!(leg = i, position = ?leg.foot.position, "foot planted");
                self.events.push(FootEvent {
                    tick: ctx.tick,
                    leg: i,
                    kind: FootEventKind::Planted,
                    position: leg.foot.position,
                });
            }
        }

        for leg in self.legs.iter_mut().filter(|leg| leg.foot.planted) {
            if let Some(surface) = self.terrain.surface_at(leg.foot.position) {
                leg.foot.position = surface.position;
                leg.foot.normal = surface.normal;
            }
        }

        self.pelvis.update(
            &self.legs,
            self.character.height,
            self.gait.balance_blend(dt),
        );
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Foot states in leg order.
    pub fn feet(&self) -> impl ExactSizeIterator<Item = &FootState> {
        self.legs.iter().map(|leg| &leg.foot)
    }

    pub fn pelvis_offset(&self) -> Vec3 {
        self.pelvis.offset()
    }

    /// Mean planted-foot position, if any foot is planted.
    pub fn support_centroid(&self) -> Option<Vec3> {
        PelvisBalancer::support_centroid(&self.legs)
    }

    pub fn stride_duration(&self) -> f32 {
        self.stride_duration
    }

    /// Nominal gait-cycle phase of `leg` in `[0, 1)` at the current speed.
    pub fn cycle_phase(&self, leg: usize) -> f32 {
        self.clock.cycle_phase(leg, self.stride_duration)
    }

    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    pub fn gait_groups(&self) -> &GaitGroups {
        &self.groups
    }

    pub fn clock(&self) -> &GaitClock {
        &self.clock
    }

    pub fn gait_parameters(&self) -> GaitParameters {
        self.gait
    }

    /// Replace gait tuning; values are clamped and take effect on the next tick.
    pub fn set_gait_parameters(&mut self, gait: GaitParameters) {
        self.gait = gait.sanitized();
    }

    pub fn probe_config(&self) -> ProbeConfig {
        self.terrain.probe()
    }

    pub fn set_probe_config(&mut self, probe: ProbeConfig) {
        self.terrain.set_probe(probe);
    }

    pub fn set_body(&mut self, height: f32, radius: f32) {
        if height.is_finite() {
            self.character.height = height.max(0.0);
        }
        if radius.is_finite() {
            self.character.radius = radius.max(0.0);
        }
    }

    pub fn terrain(&self) -> &T {
        self.terrain.query()
    }

    /// Resolve `desired` against the terrain exactly as a stepping foot would, without touching
    /// any leg.
    pub fn find_safe_placement(&self, desired: Vec3) -> Option<Placement> {
        self.terrain.resolve_plant_position(desired)
    }

    /// Lift and plant events recorded during the last tick.
    pub fn events(&self) -> &[FootEvent] {
        &self.events
    }

    /// Forward the last tick's events into `sink`, leaving the buffer empty.
    pub fn drain_events(&mut self, sink: &mut impl FootEventSink) {
        for event in self.events.drain(..) {
            sink.emit(event);
        }
    }

    /// Push the current foot targets and pelvis offset into a skeleton.
    pub fn publish(
        &self,
        joints: &JointTable,
        binding: &mut impl SkeletonBinding,
    ) -> Result<(), BindingError> {
        if joints.leg_count() != self.legs.len() {
            return Err(BindingError::JointCountMismatch {
                expected: self.legs.len(),
                actual: joints.leg_count(),
            });
        }
        for (joint, leg) in joints.feet.iter().zip(&self.legs) {
            binding.place_foot(
                joint,
                FootPose {
                    position: leg.foot.position,
                    normal: leg.foot.normal,
                    planted: leg.foot.planted,
                    phase: leg.foot.phase,
                },
            );
        }
        binding.offset_pelvis(&joints.pelvis, self.pelvis.offset());
        Ok(())
    }
}
